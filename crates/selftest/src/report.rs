//! Rendering of the self-test report.

use anyhow::{Context, Result};
use common::SelfTestReport;

/// Serialise `report` as JSON.
pub fn render(report: &SelfTestReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.context("failed to serialise self-test report")
}

/// Process exit code for `report`: `0` when every check passed, `1` otherwise.
pub fn exit_code(report: &SelfTestReport) -> i32 {
    if report.passed() {
        0
    } else {
        1
    }
}
