//! Errors produced by the primitive layer.

use common::ProviderError;
use thiserror::Error;

use super::KEY_LEN;

/// Errors produced by the primitive layer.
///
/// The provider decides which of these surface as a failure value and which
/// become a [`common::ProviderError`]; decrypt paths collapse all of them into
/// one indistinguishable outcome.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The nonce or IV is the wrong length for the algorithm.
    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    /// A hex or base64 input could not be decoded.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// A size or count parameter is outside its contract.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// AEAD sealing or opening failed.
    #[error("aead operation failed")]
    AeadFailure,

    /// CBC decryption produced invalid padding, or the input is not whole blocks.
    #[error("cbc operation failed")]
    CbcFailure,

    /// Decrypted bytes are not valid UTF-8.
    #[error("plaintext is not valid utf-8")]
    InvalidUtf8,

    /// The key derivation backend rejected its parameters.
    #[error("key derivation failed: {0}")]
    Kdf(String),

    /// The OS random source could not be read.
    #[error("secure random source unavailable: {0}")]
    Entropy(String),
}

/// Contract violations, entropy loss, and backend rejections on paths that
/// have no documented failure value.
impl From<CryptoError> for ProviderError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidKeyLength(_)
            | CryptoError::InvalidNonceLength { .. }
            | CryptoError::InvalidEncoding
            | CryptoError::InvalidParameter(_) => ProviderError::InvalidParameter(e.to_string()),
            CryptoError::Entropy(_) => ProviderError::Unavailable(e.to_string()),
            CryptoError::AeadFailure
            | CryptoError::CbcFailure
            | CryptoError::InvalidUtf8
            | CryptoError::Kdf(_) => ProviderError::Backend(e.to_string()),
        }
    }
}
