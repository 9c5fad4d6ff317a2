//! Startup capability selection.
//!
//! A [`Selector`] holds an ordered list of named candidate factories. At
//! startup it instantiates each candidate in turn, probes its backend, and
//! (optionally) runs the known-answer self-test. The first candidate that
//! passes is returned as `Arc<dyn CryptoProvider>`; callers never see the
//! concrete type.

use std::sync::Arc;

use common::ProviderError;
use tracing::{info, warn};

use super::{CryptoProvider, RustCryptoProvider};
use crate::config::{ProviderConfig, AUTO_BACKEND};
use crate::selftest;

/// Builds a fresh provider instance for one selection attempt.
pub type ProviderFactory = Box<dyn Fn() -> Arc<dyn CryptoProvider> + Send + Sync>;

/// Ordered set of candidate providers plus the selection policy.
pub struct Selector {
    candidates: Vec<(String, ProviderFactory)>,
    backend: String,
    self_test: bool,
}

impl Selector {
    /// Create a selector with the built-in RustCrypto candidate.
    pub fn new(cfg: &ProviderConfig) -> Self {
        let offload_kdf = cfg.offload_kdf;
        let rustcrypto: ProviderFactory = Box::new(move || {
            Arc::new(RustCryptoProvider::new(offload_kdf)) as Arc<dyn CryptoProvider>
        });
        Self {
            candidates: vec![(RustCryptoProvider::NAME.to_owned(), rustcrypto)],
            backend: cfg.backend.trim().to_owned(),
            self_test: cfg.self_test_on_select,
        }
    }

    /// Register a candidate ahead of every existing one.
    ///
    /// Platform-specific providers go here so they win over the portable
    /// fallback whenever their backend is usable.
    pub fn prefer(mut self, name: impl Into<String>, factory: ProviderFactory) -> Self {
        self.candidates.insert(0, (name.into(), factory));
        self
    }

    /// Candidate names in the order they will be tried.
    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Pick the first usable candidate.
    ///
    /// Rejected candidates are deinitialised before moving on.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unavailable`] if no candidate matches the
    /// configured backend or none passes its checks.
    pub async fn select(&self) -> Result<Arc<dyn CryptoProvider>, ProviderError> {
        for (name, factory) in &self.candidates {
            if self.backend != AUTO_BACKEND && self.backend != *name {
                continue;
            }

            let provider = factory();
            if !provider.is_available() {
                warn!(candidate = %name, "crypto backend unavailable; skipping");
                provider.deinit();
                continue;
            }

            if self.self_test {
                let report = selftest::run(provider.as_ref()).await;
                if !report.passed() {
                    warn!(
                        candidate = %name,
                        failures = ?report.failures(),
                        "crypto provider failed self-test; skipping"
                    );
                    provider.deinit();
                    continue;
                }
            }

            info!(provider = %name, self_tested = self.self_test, "crypto provider selected");
            return Ok(provider);
        }

        Err(ProviderError::Unavailable(format!(
            "no usable crypto provider for backend {:?}",
            self.backend
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockCryptoProvider;
    use common::{Operation, ProviderInfo};

    fn cfg(backend: &str, self_test: bool) -> ProviderConfig {
        ProviderConfig {
            backend: backend.into(),
            offload_kdf: false,
            self_test_on_select: self_test,
        }
    }

    fn unavailable_mock() -> ProviderFactory {
        Box::new(|| {
            let mut m = MockCryptoProvider::new();
            m.expect_is_available().return_const(false);
            m.expect_deinit().times(1).return_const(());
            Arc::new(m) as Arc<dyn CryptoProvider>
        })
    }

    fn available_mock(name: &'static str) -> ProviderFactory {
        Box::new(move || {
            let mut m = MockCryptoProvider::new();
            m.expect_is_available().return_const(true);
            m.expect_info()
                .returning(move || ProviderInfo::new(name, vec![Operation::GenerateUuidSync]));
            Arc::new(m) as Arc<dyn CryptoProvider>
        })
    }

    #[test]
    fn preferred_candidates_come_first() {
        let s = Selector::new(&cfg("auto", false)).prefer("native", unavailable_mock());
        assert_eq!(s.candidate_names(), vec!["native", "rustcrypto"]);
    }

    #[tokio::test]
    async fn auto_falls_back_past_unavailable_candidate() {
        let s = Selector::new(&cfg("auto", false)).prefer("native", unavailable_mock());
        let p = s.select().await.unwrap();
        assert_eq!(p.info().name, RustCryptoProvider::NAME);
    }

    #[tokio::test]
    async fn preferred_available_candidate_wins() {
        let s = Selector::new(&cfg("auto", false)).prefer("native", available_mock("native"));
        let p = s.select().await.unwrap();
        assert_eq!(p.info().name, "native");
    }

    #[tokio::test]
    async fn named_backend_skips_others() {
        let s = Selector::new(&cfg("rustcrypto", false)).prefer("native", available_mock("native"));
        let p = s.select().await.unwrap();
        assert_eq!(p.info().name, RustCryptoProvider::NAME);
    }

    #[tokio::test]
    async fn unknown_backend_is_unavailable() {
        let err = Selector::new(&cfg("hsm", false))
            .select()
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), "unavailable");
    }

    #[tokio::test]
    async fn builtin_passes_self_test() {
        let p = Selector::new(&cfg("auto", true)).select().await.unwrap();
        assert!(p.is_available());
        assert_eq!(p.info().name, RustCryptoProvider::NAME);
    }

    #[tokio::test]
    async fn candidate_failing_self_test_is_rejected() {
        let broken: ProviderFactory = Box::new(|| {
            let mut m = MockCryptoProvider::new();
            m.expect_is_available().return_const(true);
            m.expect_info()
                .returning(|| ProviderInfo::new("broken", vec![]));
            m.expect_sha256()
                .returning(|_| Ok("0".repeat(64)));
            m.expect_deinit().times(1).return_const(());
            Arc::new(m) as Arc<dyn CryptoProvider>
        });
        let s = Selector::new(&cfg("auto", true)).prefer("broken", broken);
        let p = s.select().await.unwrap();
        assert_eq!(p.info().name, RustCryptoProvider::NAME);
    }
}
