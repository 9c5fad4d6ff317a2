//! Configuration loading and validation for the self-test binary.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated self-test configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print the JSON report instead of a single line.
    #[serde(default)]
    pub pretty_report: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from `NOTECRYPT_SELFTEST_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("NOTECRYPT_SELFTEST").try_parsing(true))
            .build()
            .context("failed to build self-test configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise self-test configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("NOTECRYPT_SELFTEST_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_rejects_empty_log_level() {
        let cfg = Config {
            log_level: " ".into(),
            pretty_report: false,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_valid_config() {
        let cfg = Config {
            log_level: "debug".into(),
            pretty_report: true,
        };
        assert!(cfg.validate().is_ok());
    }
}
