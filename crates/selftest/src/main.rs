//! `notecrypt-selftest`: selects the crypto provider exactly as an application
//! would at startup, runs the full self-test against it, and prints the JSON
//! report to stdout.
//!
//! Startup sequence:
//! 1. Load and validate [`config::Config`] and [`ProviderConfig`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Select a provider and install it in the process-wide slot.
//! 4. Run the self-test, print the report, tear the provider down.

mod config;
mod report;
mod telemetry;

use anyhow::{Context, Result};
use notecrypt_provider::{selftest, ProviderConfig, ProviderSlot, Selector};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: self-test configuration invalid: {e}");
        e
    })?;
    let provider_cfg = ProviderConfig::from_env().map_err(|e| {
        eprintln!("ERROR: provider configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %provider_cfg.backend,
        "notecrypt-selftest starting"
    );

    // -----------------------------------------------------------------------
    // 3. Provider selection
    // -----------------------------------------------------------------------
    let provider = Selector::new(&provider_cfg)
        .select()
        .await
        .context("crypto provider selection failed")?;
    let slot = ProviderSlot::global();
    slot.install(provider);

    // -----------------------------------------------------------------------
    // 4. Self-test
    // -----------------------------------------------------------------------
    let report = selftest::run(slot.current()?.as_ref()).await;
    println!("{}", report::render(&report, cfg.pretty_report)?);
    slot.teardown();

    let code = report::exit_code(&report);
    if code != 0 {
        error!(failures = ?report.failures(), "self-test failed");
        std::process::exit(code);
    }
    info!(checks = report.checks.len(), "self-test passed");
    Ok(())
}
