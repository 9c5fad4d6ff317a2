//! Common error types shared across crates.

use thiserror::Error;

/// Exceptional provider failures.
///
/// Expected failures (wrong key, tampered ciphertext, malformed base64) are
/// never reported through this type; those operations return `Ok(None)`.
/// Variants map to short machine-readable codes:
/// - [`ProviderError::Unavailable`] → `"unavailable"`
/// - [`ProviderError::InvalidParameter`] → `"invalid_parameter"`
/// - [`ProviderError::Backend`] → `"backend_failure"`
/// - [`ProviderError::Internal`] → `"internal_error"`
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No provider is installed, or the provider has been torn down.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// A call violated a parameter contract (bit length, key size, encoding)
    /// on an operation that has no documented failure value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The underlying primitive rejected the request.
    #[error("backend failure: {0}")]
    Backend(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::Unavailable(_) => "unavailable",
            ProviderError::InvalidParameter(_) => "invalid_parameter",
            ProviderError::Backend(_) => "backend_failure",
            ProviderError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(ProviderError::Unavailable("x".into()).code(), "unavailable");
        assert_eq!(
            ProviderError::InvalidParameter("x".into()).code(),
            "invalid_parameter"
        );
        assert_eq!(ProviderError::Backend("x".into()).code(), "backend_failure");
        assert_eq!(ProviderError::Internal("x".into()).code(), "internal_error");
    }

    #[test]
    fn display_includes_message() {
        let e = ProviderError::InvalidParameter("bits must be a multiple of 8".into());
        assert!(e.to_string().contains("bits must be a multiple of 8"));
    }
}
