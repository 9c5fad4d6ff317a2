//! Provider description and self-test report types.
//!
//! These types are serialised as JSON by the `notecrypt-selftest` binary.

use serde::{Deserialize, Serialize};

use crate::operation::Operation;

// ---------------------------------------------------------------------------
// Provider description
// ---------------------------------------------------------------------------

/// Static description of a concrete provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Short backend name (e.g. `"rustcrypto"`).
    pub name: String,
    /// Slots that return a sentinel instead of a real value.
    pub unsupported: Vec<Operation>,
}

impl ProviderInfo {
    /// Construct a [`ProviderInfo`] from a name and its unsupported slots.
    pub fn new(name: impl Into<String>, unsupported: Vec<Operation>) -> Self {
        Self {
            name: name.into(),
            unsupported,
        }
    }

    /// Returns `true` if `op` yields a real value on this provider.
    pub fn supports(&self, op: Operation) -> bool {
        !self.unsupported.contains(&op)
    }
}

// ---------------------------------------------------------------------------
// Self-test report
// ---------------------------------------------------------------------------

/// Outcome of one self-test check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name (e.g. `"sha256_empty"`).
    pub name: String,
    /// Whether the provider produced the expected result.
    pub passed: bool,
}

/// Full self-test report for one provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfTestReport {
    /// Provider the checks ran against.
    pub provider: ProviderInfo,
    /// Individual checks, in execution order.
    pub checks: Vec<CheckResult>,
}

impl SelfTestReport {
    /// Create an empty report for `provider`.
    pub fn new(provider: ProviderInfo) -> Self {
        Self {
            provider,
            checks: Vec::new(),
        }
    }

    /// Record the outcome of a named check.
    pub fn record(&mut self, name: impl Into<String>, passed: bool) {
        self.checks.push(CheckResult {
            name: name.into(),
            passed,
        });
    }

    /// `true` when at least one check ran and none failed.
    pub fn passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|c| c.passed)
    }

    /// Names of the checks that failed.
    pub fn failures(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.as_str())
            .collect()
    }
}
