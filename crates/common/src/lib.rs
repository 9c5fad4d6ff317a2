//! Common types shared across `notecrypt` crates: the provider error taxonomy,
//! operation slot names, and self-test report types.

pub mod error;
pub mod operation;
pub mod report;

pub use error::ProviderError;
pub use operation::Operation;
pub use report::{CheckResult, ProviderInfo, SelfTestReport};
