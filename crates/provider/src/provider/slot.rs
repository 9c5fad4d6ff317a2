//! [`ProviderSlot`]: process-wide handle to the selected provider.
//!
//! The slot uses `arc-swap` so the hot path (`current`) never takes a lock.
//! Teardown swaps the provider out and releases it exactly once.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwapOption;
use common::ProviderError;
use tracing::info;

use super::CryptoProvider;

/// Shared, lock-free slot holding at most one provider.
#[derive(Clone, Default)]
pub struct ProviderSlot {
    inner: Arc<ArcSwapOption<Arc<dyn CryptoProvider>>>,
}

impl std::fmt::Debug for ProviderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let installed = self.inner.load_full().map(|p| p.info().name);
        f.debug_struct("ProviderSlot")
            .field("installed", &installed)
            .finish()
    }
}

impl ProviderSlot {
    /// Create a new, empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide slot.
    pub fn global() -> &'static ProviderSlot {
        static GLOBAL: OnceLock<ProviderSlot> = OnceLock::new();
        GLOBAL.get_or_init(ProviderSlot::new)
    }

    /// Returns `true` if a provider is installed.
    pub fn is_installed(&self) -> bool {
        self.inner.load().is_some()
    }

    /// Install `provider`, releasing any provider it replaces.
    ///
    /// Re-installing the provider already in the slot leaves it live.
    pub fn install(&self, provider: Arc<dyn CryptoProvider>) {
        let name = provider.info().name;
        let incoming = Arc::clone(&provider);
        if let Some(previous) = self.inner.swap(Some(Arc::new(provider))) {
            if !Arc::ptr_eq(&*previous, &incoming) {
                previous.deinit();
            }
        }
        info!(provider = %name, "crypto provider installed");
    }

    /// Borrow the installed provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unavailable`] if nothing is installed.
    pub fn current(&self) -> Result<Arc<dyn CryptoProvider>, ProviderError> {
        self.inner
            .load_full()
            .map(|p| Arc::clone(&*p))
            .ok_or_else(|| ProviderError::Unavailable("no crypto provider installed".into()))
    }

    /// Remove and release the installed provider.
    ///
    /// Safe on an empty slot and on repeated calls; the provider is released
    /// at most once.
    pub fn teardown(&self) {
        if let Some(provider) = self.inner.swap(None) {
            provider.deinit();
            info!("crypto provider torn down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockCryptoProvider, RustCryptoProvider};
    use common::ProviderInfo;

    fn mock_expecting_deinit(times: usize) -> Arc<dyn CryptoProvider> {
        let mut m = MockCryptoProvider::new();
        m.expect_info()
            .returning(|| ProviderInfo::new("mock", vec![]));
        m.expect_deinit().times(times).return_const(());
        Arc::new(m)
    }

    #[test]
    fn initially_empty() {
        let slot = ProviderSlot::new();
        assert!(!slot.is_installed());
        assert_eq!(slot.current().err().unwrap().code(), "unavailable");
    }

    #[test]
    fn teardown_on_empty_slot_is_noop() {
        let slot = ProviderSlot::new();
        slot.teardown();
        slot.teardown();
        assert!(!slot.is_installed());
    }

    #[test]
    fn teardown_releases_exactly_once() {
        let slot = ProviderSlot::new();
        slot.install(mock_expecting_deinit(1));
        assert!(slot.is_installed());
        slot.teardown();
        slot.teardown();
        assert!(slot.current().is_err());
    }

    #[test]
    fn install_releases_replaced_provider() {
        let slot = ProviderSlot::new();
        slot.install(mock_expecting_deinit(1));
        slot.install(Arc::new(RustCryptoProvider::new(false)));
        assert_eq!(slot.current().unwrap().info().name, RustCryptoProvider::NAME);
    }

    #[tokio::test]
    async fn reinstalling_same_provider_keeps_it_live() {
        let slot = ProviderSlot::new();
        let p: Arc<dyn CryptoProvider> = Arc::new(RustCryptoProvider::new(false));
        slot.install(Arc::clone(&p));
        slot.install(Arc::clone(&p));
        let digest = slot.current().unwrap().sha256("").await.unwrap();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert!(p.is_available());
        slot.teardown();
        assert!(!p.is_available());
    }

    #[test]
    fn reinstalling_same_mock_never_releases_it() {
        let slot = ProviderSlot::new();
        let m = mock_expecting_deinit(1);
        slot.install(Arc::clone(&m));
        slot.install(Arc::clone(&m));
        // Released once, by teardown.
        slot.teardown();
    }

    #[tokio::test]
    async fn clones_share_the_same_provider() {
        let slot = ProviderSlot::new();
        let clone = slot.clone();
        slot.install(Arc::new(RustCryptoProvider::new(false)));
        let digest = clone.current().unwrap().sha256("").await.unwrap();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        slot.teardown();
        assert!(!clone.is_installed());
    }

    #[test]
    fn global_slot_is_shared() {
        assert!(std::ptr::eq(ProviderSlot::global(), ProviderSlot::global()));
    }
}
