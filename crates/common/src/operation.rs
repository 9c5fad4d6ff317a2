//! Names of every slot in the provider contract.
//!
//! Providers report the slots they cannot serve via
//! [`ProviderInfo::unsupported`](crate::ProviderInfo::unsupported); callers use
//! this to tell a sentinel value apart from a real result.

use serde::{Deserialize, Serialize};

/// One operation slot of the provider interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ConstantTimeEqual,
    DeriveKeyPbkdf2,
    DeriveKeyArgon2,
    GenerateRandomKey,
    EncryptAead,
    DecryptAead,
    EncryptCbc,
    DecryptCbc,
    Hmac256,
    Sha256,
    UnsafeSha1,
    GenerateUuid,
    GenerateUuidSync,
    Base64Encode,
    Base64Decode,
}

impl Operation {
    /// Every slot, in interface order.
    pub const ALL: [Operation; 15] = [
        Operation::ConstantTimeEqual,
        Operation::DeriveKeyPbkdf2,
        Operation::DeriveKeyArgon2,
        Operation::GenerateRandomKey,
        Operation::EncryptAead,
        Operation::DecryptAead,
        Operation::EncryptCbc,
        Operation::DecryptCbc,
        Operation::Hmac256,
        Operation::Sha256,
        Operation::UnsafeSha1,
        Operation::GenerateUuid,
        Operation::GenerateUuidSync,
        Operation::Base64Encode,
        Operation::Base64Decode,
    ];

    /// Stable snake_case name, identical to the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ConstantTimeEqual => "constant_time_equal",
            Operation::DeriveKeyPbkdf2 => "derive_key_pbkdf2",
            Operation::DeriveKeyArgon2 => "derive_key_argon2",
            Operation::GenerateRandomKey => "generate_random_key",
            Operation::EncryptAead => "encrypt_aead",
            Operation::DecryptAead => "decrypt_aead",
            Operation::EncryptCbc => "encrypt_cbc",
            Operation::DecryptCbc => "decrypt_cbc",
            Operation::Hmac256 => "hmac256",
            Operation::Sha256 => "sha256",
            Operation::UnsafeSha1 => "unsafe_sha1",
            Operation::GenerateUuid => "generate_uuid",
            Operation::GenerateUuidSync => "generate_uuid_sync",
            Operation::Base64Encode => "base64_encode",
            Operation::Base64Decode => "base64_decode",
        }
    }

    /// Whether the slot exists only to read data written by older formats.
    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            Operation::EncryptCbc | Operation::DecryptCbc | Operation::UnsafeSha1
        )
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
