//! # notecrypt-provider
//!
//! Cryptographic provider for the notecrypt mobile client.
//!
//! The provider implements a fixed set of primitives behind the object-safe
//! [`CryptoProvider`] trait. It knows *how* to encrypt; the orchestration
//! layer that consumes it decides *when* and *why*.
//!
//! - **AEAD**: XChaCha20-Poly1305 with caller-supplied nonce and associated data
//! - **Legacy**: AES-256-CBC + HMAC-SHA256 encrypt-then-MAC, SHA-1
//! - **KDF**: PBKDF2-HMAC-SHA512, Argon2id
//! - **Misc**: SHA-256, CSPRNG keys, v4 UUIDs, constant-time comparison,
//!   unpadded base64
//!
//! ## Startup
//!
//! ```no_run
//! # async fn start() -> anyhow::Result<()> {
//! use notecrypt_provider::{ProviderConfig, ProviderSlot, Selector};
//!
//! let cfg = ProviderConfig::from_env()?;
//! let provider = Selector::new(&cfg).select().await?;
//! ProviderSlot::global().install(provider);
//!
//! let digest = ProviderSlot::global().current()?.sha256("").await?;
//! # let _ = digest;
//! ProviderSlot::global().teardown();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crypto;
pub mod provider;
pub mod selftest;

pub use common::{Operation, ProviderError, ProviderInfo, SelfTestReport};
pub use config::ProviderConfig;
pub use provider::{CryptoProvider, ProviderFactory, ProviderSlot, RustCryptoProvider, Selector};
