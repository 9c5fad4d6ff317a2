//! [`RustCryptoProvider`]: the [`CryptoProvider`] backed by the RustCrypto crates.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::{Operation, ProviderError, ProviderInfo};
use tracing::debug;
use zeroize::Zeroizing;

use super::CryptoProvider;
use crate::config::ProviderConfig;
use crate::crypto::{aead, cbc, codec, compare, digest, kdf, random, CryptoError};

/// Provider backed by RustCrypto primitives and the OS CSPRNG.
#[derive(Debug)]
pub struct RustCryptoProvider {
    offload_kdf: bool,
    released: AtomicBool,
}

impl RustCryptoProvider {
    /// Backend name reported in [`ProviderInfo`] and matched by the selector.
    pub const NAME: &'static str = "rustcrypto";

    /// Create a provider. With `offload_kdf`, PBKDF2 and Argon2 run on the
    /// Tokio blocking pool whenever a runtime is present.
    pub fn new(offload_kdf: bool) -> Self {
        Self {
            offload_kdf,
            released: AtomicBool::new(false),
        }
    }

    /// Create a provider from a validated [`ProviderConfig`].
    pub fn from_config(cfg: &ProviderConfig) -> Self {
        Self::new(cfg.offload_kdf)
    }

    fn ensure_live(&self) -> Result<(), ProviderError> {
        if self.released.load(Ordering::Acquire) {
            return Err(ProviderError::Unavailable(
                "provider has been deinitialised".into(),
            ));
        }
        Ok(())
    }

    /// Run a CPU-heavy derivation, off the async worker when configured.
    async fn run_kdf<F, T>(&self, f: F) -> Result<T, ProviderError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if self.offload_kdf && tokio::runtime::Handle::try_current().is_ok() {
            tokio::task::spawn_blocking(f)
                .await
                .map_err(|e| ProviderError::Internal(format!("key derivation task failed: {e}")))
        } else {
            Ok(f())
        }
    }
}

impl Default for RustCryptoProvider {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Collapse an expected failure into the uniform `None` outcome.
fn failure_to_none<T>(op: Operation, result: Result<T, CryptoError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(_) => {
            // Only the operation name is recorded.
            debug!(op = %op, "operation failed");
            None
        }
    }
}

#[async_trait]
impl CryptoProvider for RustCryptoProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo::new(Self::NAME, vec![Operation::GenerateUuidSync])
    }

    fn is_available(&self) -> bool {
        self.ensure_live().is_ok() && random::random_bytes(1).is_ok()
    }

    fn constant_time_equal(&self, a: &str, b: &str) -> bool {
        compare::constant_time_eq(a, b)
    }

    async fn derive_key_pbkdf2(
        &self,
        password: &str,
        salt: &str,
        iterations: u32,
        output_length_bits: u32,
    ) -> Result<Option<String>, ProviderError> {
        self.ensure_live()?;
        let password = Zeroizing::new(password.to_owned());
        let salt = salt.to_owned();
        let result = self
            .run_kdf(move || kdf::pbkdf2_sha512(&password, &salt, iterations, output_length_bits))
            .await?;
        Ok(failure_to_none(Operation::DeriveKeyPbkdf2, result))
    }

    async fn derive_key_argon2(
        &self,
        password: &str,
        salt: &str,
        iterations: u32,
        memory_cost_bytes: u64,
        output_length_bits: u32,
    ) -> Result<String, ProviderError> {
        self.ensure_live()?;
        let password = Zeroizing::new(password.to_owned());
        let salt = salt.to_owned();
        let key = self
            .run_kdf(move || {
                kdf::argon2id(
                    &password,
                    &salt,
                    iterations,
                    memory_cost_bytes,
                    output_length_bits,
                )
            })
            .await??;
        Ok(key)
    }

    async fn generate_random_key(&self, bits: u32) -> Result<String, ProviderError> {
        self.ensure_live()?;
        Ok(random::random_key_hex(bits)?)
    }

    async fn encrypt_aead(
        &self,
        plaintext: &str,
        nonce: &str,
        key: &str,
        associated_data: &str,
    ) -> Result<String, ProviderError> {
        self.ensure_live()?;
        Ok(aead::encrypt(plaintext, nonce, key, associated_data)?)
    }

    async fn decrypt_aead(
        &self,
        ciphertext: &str,
        nonce: &str,
        key: &str,
        associated_data: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.ensure_live()?;
        Ok(failure_to_none(
            Operation::DecryptAead,
            aead::decrypt(ciphertext, nonce, key, associated_data),
        ))
    }

    async fn encrypt_cbc(
        &self,
        plaintext: &str,
        iv: &str,
        key: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.ensure_live()?;
        Ok(failure_to_none(
            Operation::EncryptCbc,
            cbc::encrypt(plaintext, iv, key),
        ))
    }

    async fn decrypt_cbc(
        &self,
        ciphertext: &str,
        iv: &str,
        key: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.ensure_live()?;
        Ok(failure_to_none(
            Operation::DecryptCbc,
            cbc::decrypt(ciphertext, iv, key),
        ))
    }

    async fn hmac256(&self, message: &str, key: &str) -> Result<Option<String>, ProviderError> {
        self.ensure_live()?;
        Ok(failure_to_none(
            Operation::Hmac256,
            digest::hmac_sha256_hex(message, key),
        ))
    }

    async fn sha256(&self, text: &str) -> Result<String, ProviderError> {
        self.ensure_live()?;
        Ok(digest::sha256_hex(text))
    }

    async fn unsafe_sha1(&self, text: &str) -> Result<String, ProviderError> {
        self.ensure_live()?;
        Ok(digest::unsafe_sha1_hex(text))
    }

    async fn generate_uuid(&self) -> Result<String, ProviderError> {
        self.ensure_live()?;
        Ok(random::uuid_v4()?)
    }

    async fn base64_encode(&self, text: &str) -> Result<String, ProviderError> {
        self.ensure_live()?;
        Ok(codec::encode_base64(text.as_bytes()))
    }

    async fn base64_decode(&self, encoded: &str) -> Result<Option<String>, ProviderError> {
        self.ensure_live()?;
        let decoded = codec::decode_base64(encoded)
            .and_then(|bytes| String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8));
        Ok(failure_to_none(Operation::Base64Decode, decoded))
    }

    fn deinit(&self) {
        if !self.released.swap(true, Ordering::AcqRel) {
            debug!(provider = Self::NAME, "provider released");
        }
    }
}
