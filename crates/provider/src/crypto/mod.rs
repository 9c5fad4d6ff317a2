//! Cryptographic primitives behind the provider contract.
//!
//! This module is intentionally free of async, configuration, and lifecycle
//! concerns. Every function is a synchronous, pure request/response over the
//! text encodings the provider exposes:
//!
//! | value | encoding |
//! |---|---|
//! | keys, nonces, IVs, digests, MACs | lowercase hex |
//! | AEAD / CBC ciphertext | standard padded base64 |
//! | `base64_encode` / `base64_decode` | standard unpadded base64 |
//! | plaintext, passwords, associated data | UTF-8 |
//!
//! The actual math is delegated to the RustCrypto crates.

pub mod aead;
pub mod cbc;
pub mod codec;
pub mod compare;
pub mod digest;
pub mod error;
pub mod kdf;
pub mod random;

pub use error::CryptoError;

/// Byte length of every symmetric key accepted by this module (256 bits).
pub const KEY_LEN: usize = 32;

/// Converts a bit length into a byte length.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidParameter`] if `bits` is zero or not a
/// multiple of 8.
pub(crate) fn byte_len(bits: u32) -> Result<usize, CryptoError> {
    if bits == 0 || bits % 8 != 0 {
        return Err(CryptoError::InvalidParameter(format!(
            "bit length must be a positive multiple of 8, got {bits}"
        )));
    }
    Ok((bits / 8) as usize)
}
