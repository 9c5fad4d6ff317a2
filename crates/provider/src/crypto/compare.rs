//! Constant-time string comparison.

use subtle::{Choice, ConstantTimeEq};

/// Compare two strings without an early exit on the first differing byte.
///
/// When the lengths differ, `a` is compared against itself so the same amount
/// of work is done, and the result is forced to `false`.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let lhs = a.as_bytes();
    let (rhs, length_mismatch) = if lhs.len() == b.len() {
        (b.as_bytes(), Choice::from(0))
    } else {
        (lhs, Choice::from(1))
    };
    bool::from(lhs.ct_eq(rhs) & !length_mismatch)
}
