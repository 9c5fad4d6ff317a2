//! SHA-256, legacy SHA-1, and HMAC-SHA256. All outputs are lowercase hex.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::codec::decode_secret_hex;
use super::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of the UTF-8 bytes of `text`.
pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// SHA-1 of the UTF-8 bytes of `text`.
///
/// SHA-1 is broken for collision resistance. This exists only to read data
/// fingerprinted by old formats.
pub fn unsafe_sha1_hex(text: &str) -> String {
    hex::encode(Sha1::digest(text.as_bytes()))
}

/// HMAC-SHA256 of the UTF-8 bytes of `message` under a hex-encoded key.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidEncoding`] if `key_hex` is not valid hex.
pub fn hmac_sha256_hex(message: &str, key_hex: &str) -> Result<String, CryptoError> {
    let key = decode_secret_hex(key_hex)?;
    let mut mac = <HmacSha256 as Mac>::new_from_slice(&key)
        .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
