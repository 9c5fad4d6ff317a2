//! Known-answer and consistency checks runnable against any provider.
//!
//! Used by the [`Selector`](crate::provider::Selector) to vet candidates at
//! startup and by the `notecrypt-selftest` binary. Checks run in a fixed order
//! and stop at the first failure. No key material enters the report.

use common::{ProviderError, SelfTestReport};

use crate::crypto::codec::{decode_ciphertext, encode_ciphertext};
use crate::crypto::random::is_uuid_v4;
use crate::provider::CryptoProvider;

const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const SHA1_ABC: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";
const HMAC_RFC4231_CASE2: &str = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";
const PBKDF2_SHA512_C2: &str = "e1d9c16aa681708a45f5c7c4e215ceb66e011a2e9f0040713f18aefdb866d53c\
                                f76cab2868a39b9f7840edce4fef5a82be67335c77a6068e04112754f27ccf4e";

const KAT_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
const KAT_NONCE: &str = "000102030405060708090a0b0c0d0e0f1011121314151617";
const KAT_IV: &str = "000102030405060708090a0b0c0d0e0f";
const KAT_TEXT: &str = "hello notecrypt";
const KAT_AD: &str = r#"{"u":"item-1","v":"004"}"#;
const KAT_AEAD_CT: &str = "9qdjE//y48FHIUW8siLcqXpwFAkuJ8T5eyYN+Y1iEQ==";
const KAT_CBC_CT: &str = "Ujm1o5fKtyQhE72Vtk40hw==";

const UUID_SAMPLES: usize = 32;

/// One named self-test check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Sha256Empty,
    Sha256Abc,
    Sha1Abc,
    Hmac256Rfc4231Case2,
    Pbkdf2Sha512Vector,
    AeadKnownAnswer,
    AeadRoundTrip,
    AeadTamperRejected,
    CbcKnownAnswer,
    CbcRoundTrip,
    Base64RoundTrip,
    UuidV4Shape,
    ConstantTimeEqual,
    RandomKeyLength,
}

impl Check {
    /// Every check, in execution order.
    pub const ALL: [Check; 14] = [
        Check::Sha256Empty,
        Check::Sha256Abc,
        Check::Sha1Abc,
        Check::Hmac256Rfc4231Case2,
        Check::Pbkdf2Sha512Vector,
        Check::AeadKnownAnswer,
        Check::AeadRoundTrip,
        Check::AeadTamperRejected,
        Check::CbcKnownAnswer,
        Check::CbcRoundTrip,
        Check::Base64RoundTrip,
        Check::UuidV4Shape,
        Check::ConstantTimeEqual,
        Check::RandomKeyLength,
    ];

    /// Name recorded in the report.
    pub fn name(&self) -> &'static str {
        match self {
            Check::Sha256Empty => "sha256_empty",
            Check::Sha256Abc => "sha256_abc",
            Check::Sha1Abc => "sha1_abc",
            Check::Hmac256Rfc4231Case2 => "hmac256_rfc4231_case2",
            Check::Pbkdf2Sha512Vector => "pbkdf2_sha512_vector",
            Check::AeadKnownAnswer => "aead_known_answer",
            Check::AeadRoundTrip => "aead_round_trip",
            Check::AeadTamperRejected => "aead_tamper_rejected",
            Check::CbcKnownAnswer => "cbc_known_answer",
            Check::CbcRoundTrip => "cbc_round_trip",
            Check::Base64RoundTrip => "base64_round_trip",
            Check::UuidV4Shape => "uuid_v4_shape",
            Check::ConstantTimeEqual => "constant_time_equal",
            Check::RandomKeyLength => "random_key_length",
        }
    }

    async fn evaluate(self, p: &dyn CryptoProvider) -> Result<bool, ProviderError> {
        let passed = match self {
            Check::Sha256Empty => p.sha256("").await? == SHA256_EMPTY,
            Check::Sha256Abc => p.sha256("abc").await? == SHA256_ABC,
            Check::Sha1Abc => p.unsafe_sha1("abc").await? == SHA1_ABC,
            Check::Hmac256Rfc4231Case2 => {
                p.hmac256("what do ya want for nothing?", "4a656665")
                    .await?
                    .as_deref()
                    == Some(HMAC_RFC4231_CASE2)
            }
            Check::Pbkdf2Sha512Vector => {
                p.derive_key_pbkdf2("password", "salt", 2, 512)
                    .await?
                    .as_deref()
                    == Some(PBKDF2_SHA512_C2)
            }
            Check::AeadKnownAnswer => {
                let ct = p.encrypt_aead(KAT_TEXT, KAT_NONCE, KAT_KEY, KAT_AD).await?;
                ct == KAT_AEAD_CT
                    && p.decrypt_aead(&ct, KAT_NONCE, KAT_KEY, KAT_AD).await?.as_deref()
                        == Some(KAT_TEXT)
            }
            Check::AeadRoundTrip => {
                let key = p.generate_random_key(256).await?;
                let nonce = p.generate_random_key(192).await?;
                let ct = p.encrypt_aead(KAT_TEXT, &nonce, &key, KAT_AD).await?;
                p.decrypt_aead(&ct, &nonce, &key, KAT_AD).await?.as_deref() == Some(KAT_TEXT)
            }
            Check::AeadTamperRejected => {
                let other_key = p.generate_random_key(256).await?;
                p.decrypt_aead(&flip_first_byte(KAT_AEAD_CT), KAT_NONCE, KAT_KEY, KAT_AD)
                    .await?
                    .is_none()
                    && p.decrypt_aead(KAT_AEAD_CT, KAT_NONCE, KAT_KEY, "{}").await?.is_none()
                    && p.decrypt_aead(KAT_AEAD_CT, KAT_NONCE, &other_key, KAT_AD)
                        .await?
                        .is_none()
            }
            Check::CbcKnownAnswer => {
                p.encrypt_cbc(KAT_TEXT, KAT_IV, KAT_KEY).await?.as_deref() == Some(KAT_CBC_CT)
                    && p.decrypt_cbc(KAT_CBC_CT, KAT_IV, KAT_KEY).await?.as_deref()
                        == Some(KAT_TEXT)
            }
            Check::CbcRoundTrip => {
                let key = p.generate_random_key(256).await?;
                let iv = p.generate_random_key(128).await?;
                match p.encrypt_cbc(KAT_AD, &iv, &key).await? {
                    Some(ct) => p.decrypt_cbc(&ct, &iv, &key).await?.as_deref() == Some(KAT_AD),
                    None => false,
                }
            }
            Check::Base64RoundTrip => {
                let encoded = p.base64_encode(KAT_AD).await?;
                !encoded.ends_with('=')
                    && p.base64_decode(&encoded).await?.as_deref() == Some(KAT_AD)
            }
            Check::UuidV4Shape => {
                let mut all_valid = true;
                for _ in 0..UUID_SAMPLES {
                    all_valid &= is_uuid_v4(&p.generate_uuid().await?);
                }
                all_valid
            }
            Check::ConstantTimeEqual => {
                p.constant_time_equal("", "")
                    && p.constant_time_equal(SHA1_ABC, SHA1_ABC)
                    && !p.constant_time_equal(SHA1_ABC, SHA256_ABC)
                    && !p.constant_time_equal("abc", "abd")
            }
            Check::RandomKeyLength => {
                let key = p.generate_random_key(256).await?;
                key.len() == 64 && key.chars().all(|c| c.is_ascii_hexdigit())
            }
        };
        Ok(passed)
    }
}

/// Flip one bit of the first ciphertext byte, keeping the base64 well formed.
fn flip_first_byte(ciphertext_b64: &str) -> String {
    let mut raw = decode_ciphertext(ciphertext_b64).unwrap_or_default();
    if let Some(first) = raw.first_mut() {
        *first ^= 0x01;
    }
    encode_ciphertext(&raw)
}

/// Run every check against `provider`, stopping at the first failure.
///
/// A check that returns a [`ProviderError`] counts as failed.
pub async fn run(provider: &dyn CryptoProvider) -> SelfTestReport {
    let mut report = SelfTestReport::new(provider.info());
    for check in Check::ALL {
        let passed = check.evaluate(provider).await.unwrap_or(false);
        report.record(check.name(), passed);
        if !passed {
            break;
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockCryptoProvider, RustCryptoProvider};
    use common::ProviderInfo;

    #[tokio::test]
    async fn rustcrypto_passes_every_check() {
        let p = RustCryptoProvider::new(true);
        let report = run(&p).await;
        assert!(report.passed(), "failures: {:?}", report.failures());
        assert_eq!(report.checks.len(), Check::ALL.len());
        assert_eq!(report.provider.name, RustCryptoProvider::NAME);
    }

    #[tokio::test]
    async fn released_provider_fails_first_check() {
        let p = RustCryptoProvider::new(false);
        p.deinit();
        let report = run(&p).await;
        assert!(!report.passed());
        assert_eq!(report.failures(), vec!["sha256_empty"]);
        assert_eq!(report.checks.len(), 1);
    }

    #[tokio::test]
    async fn stops_at_first_failure() {
        let mut m = MockCryptoProvider::new();
        m.expect_info()
            .returning(|| ProviderInfo::new("mock", vec![]));
        m.expect_sha256().returning(|text| {
            Ok(if text.is_empty() {
                SHA256_EMPTY.to_owned()
            } else {
                "0".repeat(64)
            })
        });
        let report = run(&m).await;
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.failures(), vec!["sha256_abc"]);
    }

    #[tokio::test]
    async fn flipped_ciphertext_byte_is_rejected() {
        let p = RustCryptoProvider::new(false);
        let tampered = flip_first_byte(KAT_AEAD_CT);
        assert_ne!(tampered, KAT_AEAD_CT);
        assert_eq!(tampered.len(), KAT_AEAD_CT.len());
        assert_eq!(
            p.decrypt_aead(&tampered, KAT_NONCE, KAT_KEY, KAT_AD).await.unwrap(),
            None
        );
    }

    #[test]
    fn check_names_are_unique() {
        let mut names: Vec<_> = Check::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Check::ALL.len());
    }
}
