//! Provider configuration loading and validation.
//!
//! Values are read from `NOTECRYPT_*` environment variables. Every field has a
//! default, so an empty environment yields a usable configuration.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Backend name that lets the selector try every registered candidate.
pub const AUTO_BACKEND: &str = "auto";

/// Validated provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Backend to select: `"auto"` or the name of one candidate
    /// (e.g. `"rustcrypto"`).
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Run PBKDF2 and Argon2 on the Tokio blocking pool when a runtime is present.
    #[serde(default = "default_offload_kdf")]
    pub offload_kdf: bool,

    /// Require each candidate to pass the known-answer self-test before it is
    /// selected.
    #[serde(default = "default_self_test_on_select")]
    pub self_test_on_select: bool,
}

fn default_backend() -> String {
    AUTO_BACKEND.into()
}
fn default_offload_kdf() -> bool {
    true
}
fn default_self_test_on_select() -> bool {
    true
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            offload_kdf: default_offload_kdf(),
            self_test_on_select: default_self_test_on_select(),
        }
    }
}

impl ProviderConfig {
    /// Load and validate configuration from `NOTECRYPT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("NOTECRYPT").try_parsing(true))
            .build()
            .context("failed to build provider configuration from environment")?;

        let c: ProviderConfig = cfg
            .try_deserialize()
            .context("failed to deserialise provider configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    pub fn validate(&self) -> Result<()> {
        let backend = self.backend.trim();
        if backend.is_empty() {
            anyhow::bail!("NOTECRYPT_BACKEND must not be empty");
        }
        if !backend
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            anyhow::bail!("NOTECRYPT_BACKEND must be a lowercase backend name, got {backend:?}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_backend(), "auto");
        assert!(default_offload_kdf());
        assert!(default_self_test_on_select());
        assert!(ProviderConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_backend() {
        let cfg = ProviderConfig {
            backend: "  ".into(),
            ..ProviderConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_backend() {
        let cfg = ProviderConfig {
            backend: "RustCrypto!".into(),
            ..ProviderConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_named_backend() {
        let cfg = ProviderConfig {
            backend: "rustcrypto".into(),
            offload_kdf: false,
            self_test_on_select: false,
        };
        assert!(cfg.validate().is_ok());
    }
}
