//! Telemetry initialisation for the self-test binary.
//!
//! The binary's stdout is a machine-readable contract: exactly one JSON
//! `SelfTestReport` document, consumed by CI or a device-provisioning script.
//! Every log line (selection decisions, rejected candidates, provider
//! teardown) therefore goes to stderr as JSON, where it can be captured
//! separately without corrupting the report.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the stderr JSON subscriber at `log_level`
/// (`NOTECRYPT_SELFTEST_LOG_LEVEL`).
///
/// `RUST_LOG`, when set, takes precedence, e.g.
/// `RUST_LOG=notecrypt_provider=debug` to see uniform-failure events.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise self-test tracing subscriber: {e}"))
}
