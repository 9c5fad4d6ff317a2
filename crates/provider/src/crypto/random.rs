//! Secure randomness: raw bytes, hex keys, and version-4 UUIDs.
//!
//! Every value, including UUIDs, is drawn from the OS CSPRNG.

use rand::{rngs::OsRng, RngCore};
use uuid::Builder;
use zeroize::Zeroizing;

use super::{byte_len, CryptoError};

/// Fill a fresh zeroizing buffer of `len` bytes from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CryptoError::Entropy`] if the OS random source fails.
pub fn random_bytes(len: usize) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let mut buf = Zeroizing::new(vec![0u8; len]);
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| CryptoError::Entropy(e.to_string()))?;
    Ok(buf)
}

/// Generate `bits / 8` random bytes, hex encoded.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidParameter`] if `bits` is not a positive
/// multiple of 8, or [`CryptoError::Entropy`] if the random source fails.
pub fn random_key_hex(bits: u32) -> Result<String, CryptoError> {
    let key = random_bytes(byte_len(bits)?)?;
    Ok(hex::encode(&*key))
}

/// Generate a lowercase hyphenated RFC 4122 version-4 UUID.
///
/// Sixteen CSPRNG bytes are taken as-is except for the version nibble (always
/// `4`) and the two variant bits (always `10`, so the first nibble of the
/// fourth group is one of `8`, `9`, `a`, `b`).
pub fn uuid_v4() -> Result<String, CryptoError> {
    let mut bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::Entropy(e.to_string()))?;
    Ok(Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string())
}

/// Returns `true` if `id` has the `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx` shape
/// with lowercase hex digits and `y` in `8..=b`.
pub fn is_uuid_v4(id: &str) -> bool {
    let groups: Vec<&str> = id.split('-').collect();
    let lengths_ok = groups.len() == 5 && groups.iter().map(|g| g.len()).eq([8, 4, 4, 4, 12]);
    lengths_ok
        && id
            .chars()
            .all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c))
        && groups[2].starts_with('4')
        && matches!(groups[3].chars().next(), Some('8' | '9' | 'a' | 'b'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_key_length_follows_bits() {
        assert_eq!(random_key_hex(256).unwrap().len(), 64);
        assert_eq!(random_key_hex(8).unwrap().len(), 2);
        assert_eq!(random_key_hex(192).unwrap().len(), 48);
    }

    #[test]
    fn random_key_rejects_partial_bytes() {
        assert!(random_key_hex(0).is_err());
        assert!(random_key_hex(100).is_err());
    }

    #[test]
    fn random_keys_are_unique() {
        assert_ne!(random_key_hex(256).unwrap(), random_key_hex(256).unwrap());
    }

    #[test]
    fn uuid_shape_holds_across_samples() {
        let mut seen = HashSet::new();
        let mut variants = HashSet::new();
        for _ in 0..2000 {
            let id = uuid_v4().unwrap();
            assert!(is_uuid_v4(&id), "bad uuid: {id}");
            variants.insert(id.as_bytes()[19]);
            assert!(seen.insert(id));
        }
        // All four variant nibbles show up over enough samples.
        assert_eq!(variants.len(), 4);
    }

    #[test]
    fn shape_check_rejects_wrong_version_and_variant() {
        assert!(is_uuid_v4("0f8fad5b-d9cb-469f-a165-70867728950e"));
        assert!(!is_uuid_v4("0f8fad5b-d9cb-169f-a165-70867728950e"));
        assert!(!is_uuid_v4("0f8fad5b-d9cb-469f-c165-70867728950e"));
        assert!(!is_uuid_v4("0F8FAD5B-D9CB-469F-A165-70867728950E"));
        assert!(!is_uuid_v4(""));
    }
}
