//! Password-based key derivation: PBKDF2-HMAC-SHA512 and Argon2id.
//!
//! Cost parameters are passed to the backend exactly as given. Nothing here
//! clamps, rounds up, or substitutes defaults; a value the backend cannot
//! accept is an error.

use argon2::{Algorithm, Argon2, Params, Version};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

use super::{byte_len, CryptoError};

/// Argon2 lane count. Fixed at 1 to match keys derived by the libsodium
/// `crypto_pwhash` default algorithm.
pub const ARGON2_PARALLELISM: u32 = 1;

/// Derive a key with PBKDF2-HMAC-SHA512.
///
/// `password` and `salt` are used as UTF-8 bytes. Output is lowercase hex of
/// `output_length_bits / 8` bytes.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidParameter`] if `iterations` is zero or
/// `output_length_bits` is not a positive multiple of 8.
pub fn pbkdf2_sha512(
    password: &str,
    salt: &str,
    iterations: u32,
    output_length_bits: u32,
) -> Result<String, CryptoError> {
    let len = byte_len(output_length_bits)?;
    if iterations == 0 {
        return Err(CryptoError::InvalidParameter(
            "iterations must be positive".into(),
        ));
    }
    let mut out = Zeroizing::new(vec![0u8; len]);
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    Ok(hex::encode(&*out))
}

/// Derive a key with Argon2id (v1.3).
///
/// `salt_hex` is hex-decoded. `memory_cost_bytes` is expressed in bytes and
/// handed to the backend in its native KiB unit.
///
/// # Errors
///
/// Returns [`CryptoError::Kdf`] if the backend rejects any parameter (salt too
/// short, memory or iteration cost below its minimum, and so on).
pub fn argon2id(
    password: &str,
    salt_hex: &str,
    iterations: u32,
    memory_cost_bytes: u64,
    output_length_bits: u32,
) -> Result<String, CryptoError> {
    let len = byte_len(output_length_bits)?;
    let salt = hex::decode(salt_hex).map_err(|_| CryptoError::InvalidEncoding)?;
    let memory_cost_kib = u32::try_from(memory_cost_bytes / 1024)
        .map_err(|_| CryptoError::Kdf(format!("memory cost {memory_cost_bytes} out of range")))?;

    let params = Params::new(memory_cost_kib, iterations, ARGON2_PARALLELISM, Some(len))
        .map_err(|e| CryptoError::Kdf(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = Zeroizing::new(vec![0u8; len]);
    argon2
        .hash_password_into(password.as_bytes(), &salt, &mut out)
        .map_err(|e| CryptoError::Kdf(e.to_string()))?;
    Ok(hex::encode(&*out))
}
