//! Binary-to-text codecs used at the provider boundary.

use base64::{
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD},
    Engine as _,
};
use zeroize::Zeroizing;

use super::{CryptoError, KEY_LEN};

/// Encode arbitrary bytes as unpadded standard base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes)
}

/// Decode unpadded standard base64.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidEncoding`] for characters outside the
/// standard alphabet, impossible lengths, or trailing `=` padding.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD_NO_PAD
        .decode(encoded)
        .map_err(|_| CryptoError::InvalidEncoding)
}

/// Encode ciphertext bytes (padded standard base64, the persisted format).
pub(crate) fn encode_ciphertext(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub(crate) fn decode_ciphertext(encoded: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(encoded)
        .map_err(|_| CryptoError::InvalidEncoding)
}

/// Decode a hex-encoded [`KEY_LEN`]-byte key into a zeroizing buffer.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidEncoding`] for malformed hex and
/// [`CryptoError::InvalidKeyLength`] if the decoded key has the wrong size.
pub(crate) fn decode_key(key_hex: &str) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let key = decode_secret_hex(key_hex)?;
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyLength(key.len()));
    }
    Ok(key)
}

/// Decode hex key material of any length into a zeroizing buffer.
pub(crate) fn decode_secret_hex(value_hex: &str) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    hex::decode(value_hex)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::InvalidEncoding)
}

/// Decode a hex nonce or IV and check it is exactly `expected` bytes.
pub(crate) fn decode_nonce(nonce_hex: &str, expected: usize) -> Result<Vec<u8>, CryptoError> {
    let nonce = hex::decode(nonce_hex).map_err(|_| CryptoError::InvalidEncoding)?;
    if nonce.len() != expected {
        return Err(CryptoError::InvalidNonceLength {
            expected,
            actual: nonce.len(),
        });
    }
    Ok(nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn base64_is_unpadded() {
        assert_eq!(encode_base64(b"hello world"), "aGVsbG8gd29ybGQ");
        assert_eq!(decode_base64("aGVsbG8gd29ybGQ").unwrap(), b"hello world");
    }

    #[test]
    fn base64_rejects_padding() {
        assert!(decode_base64("aGVsbG8gd29ybGQ=").is_err());
    }

    #[test]
    fn base64_rejects_foreign_alphabet() {
        assert!(decode_base64("a-b_").is_err());
        assert!(decode_base64("!!!!").is_err());
    }

    #[test]
    fn base64_handles_nul_and_high_bytes() {
        let raw = [0x00u8, 0xFF, 0x80, 0x0A, 0x00];
        assert_eq!(decode_base64(&encode_base64(&raw)).unwrap(), raw);
    }

    #[test]
    fn ciphertext_encoding_is_padded() {
        assert_eq!(encode_ciphertext(&[0x00, 0xFF, 0x80, 0x0A]), "AP+ACg==");
        assert_eq!(decode_ciphertext("AP+ACg==").unwrap(), [0x00, 0xFF, 0x80, 0x0A]);
    }

    #[test]
    fn decode_key_checks_length() {
        assert!(decode_key(&"ab".repeat(KEY_LEN)).is_ok());
        assert!(matches!(
            decode_key(&"ab".repeat(16)),
            Err(CryptoError::InvalidKeyLength(16))
        ));
        assert!(matches!(decode_key("zz"), Err(CryptoError::InvalidEncoding)));
    }

    #[test]
    fn decode_nonce_checks_length() {
        assert!(decode_nonce(&"00".repeat(24), 24).is_ok());
        assert!(matches!(
            decode_nonce(&"00".repeat(12), 24),
            Err(CryptoError::InvalidNonceLength {
                expected: 24,
                actual: 12
            })
        ));
    }

    proptest! {
        #[test]
        fn base64_round_trips_arbitrary_bytes(raw in proptest::collection::vec(any::<u8>(), 0..256)) {
            let encoded = encode_base64(&raw);
            prop_assert!(!encoded.ends_with('='));
            prop_assert_eq!(decode_base64(&encoded).unwrap(), raw);
        }
    }
}
