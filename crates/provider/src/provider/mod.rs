//! The [`CryptoProvider`] contract, its RustCrypto implementation, startup
//! selection, and the process-wide slot holding the selected provider.
//!
//! # Failure model
//!
//! | outcome | representation |
//! |---|---|
//! | success | `Ok(value)` / `Ok(Some(value))` |
//! | expected failure (wrong key, tamper, bad base64) | `Ok(None)` |
//! | unsupported slot | empty string sentinel |
//! | exceptional (torn down, backend fault, contract violation) | `Err(ProviderError)` |
//!
//! Decrypt-family operations return one indistinguishable `Ok(None)` for
//! every cause, so callers cannot be used as a decryption oracle.

pub mod rustcrypto;
pub mod select;
pub mod slot;

pub use rustcrypto::RustCryptoProvider;
pub use select::{ProviderFactory, Selector};
pub use slot::ProviderSlot;

use async_trait::async_trait;
use common::{ProviderError, ProviderInfo};

/// A fixed set of cryptographic primitives with text (hex/base64) boundaries.
///
/// Implementations are stateless apart from their lifecycle flag and are safe
/// to call concurrently. Any operation may suspend while delegating to the
/// backend; none can be cancelled once issued.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// Describe this provider and the slots it cannot serve.
    fn info(&self) -> ProviderInfo;

    /// Probe whether the backend can currently serve requests.
    fn is_available(&self) -> bool;

    /// Compare two strings in time independent of where they first differ.
    fn constant_time_equal(&self, a: &str, b: &str) -> bool;

    /// PBKDF2 key derivation. `Ok(None)` when `iterations` is zero or
    /// `output_length_bits` is not a positive multiple of 8.
    async fn derive_key_pbkdf2(
        &self,
        password: &str,
        salt: &str,
        iterations: u32,
        output_length_bits: u32,
    ) -> Result<Option<String>, ProviderError>;

    /// Argon2id key derivation. Parameters reach the backend verbatim and a
    /// backend rejection is returned as [`ProviderError::Backend`].
    async fn derive_key_argon2(
        &self,
        password: &str,
        salt: &str,
        iterations: u32,
        memory_cost_bytes: u64,
        output_length_bits: u32,
    ) -> Result<String, ProviderError>;

    /// `bits / 8` bytes from the OS CSPRNG, hex encoded.
    async fn generate_random_key(&self, bits: u32) -> Result<String, ProviderError>;

    /// XChaCha20-Poly1305 encryption. The caller guarantees `nonce` is never
    /// reused with the same `key`.
    async fn encrypt_aead(
        &self,
        plaintext: &str,
        nonce: &str,
        key: &str,
        associated_data: &str,
    ) -> Result<String, ProviderError>;

    /// XChaCha20-Poly1305 decryption. `Ok(None)` on any failure.
    async fn decrypt_aead(
        &self,
        ciphertext: &str,
        nonce: &str,
        key: &str,
        associated_data: &str,
    ) -> Result<Option<String>, ProviderError>;

    /// AES-256-CBC encryption (legacy, unauthenticated).
    async fn encrypt_cbc(
        &self,
        plaintext: &str,
        iv: &str,
        key: &str,
    ) -> Result<Option<String>, ProviderError>;

    /// AES-256-CBC decryption (legacy, unauthenticated).
    async fn decrypt_cbc(
        &self,
        ciphertext: &str,
        iv: &str,
        key: &str,
    ) -> Result<Option<String>, ProviderError>;

    /// HMAC-SHA256 under a hex key. Compare tags with
    /// [`constant_time_equal`](Self::constant_time_equal), never `==`.
    async fn hmac256(&self, message: &str, key: &str) -> Result<Option<String>, ProviderError>;

    /// SHA-256 digest, hex encoded.
    async fn sha256(&self, text: &str) -> Result<String, ProviderError>;

    /// SHA-1 digest, hex encoded. Legacy interoperability only; never use for
    /// new security-relevant computations.
    async fn unsafe_sha1(&self, text: &str) -> Result<String, ProviderError>;

    /// Random version-4 UUID.
    async fn generate_uuid(&self) -> Result<String, ProviderError>;

    /// Synchronous UUID generation. Providers that cannot offer it keep this
    /// default, which returns the empty-string sentinel.
    fn generate_uuid_sync(&self) -> String {
        String::new()
    }

    /// Unpadded standard base64 of the UTF-8 bytes of `text`.
    async fn base64_encode(&self, text: &str) -> Result<String, ProviderError>;

    /// Inverse of [`base64_encode`](Self::base64_encode). `Ok(None)` on
    /// malformed input or non-UTF-8 content.
    async fn base64_decode(&self, encoded: &str) -> Result<Option<String>, ProviderError>;

    /// Release backend resources. Idempotent; afterwards every operation
    /// returns [`ProviderError::Unavailable`].
    fn deinit(&self);
}
