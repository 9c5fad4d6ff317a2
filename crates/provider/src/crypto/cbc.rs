//! AES-256-CBC with PKCS#7 padding.
//!
//! **Unauthenticated.** Kept only to read and write the legacy envelope, where
//! integrity comes from a separate [`hmac_sha256_hex`](super::digest::hmac_sha256_hex)
//! tag that must be verified before calling [`decrypt`].

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use super::codec::{decode_ciphertext, decode_key, decode_nonce, encode_ciphertext};
use super::CryptoError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Byte length of a CBC initialisation vector (one AES block).
pub const IV_LEN: usize = 16;

/// Encrypt a UTF-8 plaintext. Returns padded standard base64.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`], [`CryptoError::InvalidNonceLength`]
/// or [`CryptoError::InvalidEncoding`] for malformed key or IV.
pub fn encrypt(plaintext: &str, iv_hex: &str, key_hex: &str) -> Result<String, CryptoError> {
    let key = decode_key(key_hex)?;
    let iv = decode_nonce(iv_hex, IV_LEN)?;
    let cipher = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    Ok(encode_ciphertext(&ciphertext))
}

/// Decrypt a base64 ciphertext produced by [`encrypt`].
///
/// # Errors
///
/// Returns [`CryptoError::CbcFailure`] on bad padding or partial blocks, and
/// [`CryptoError::InvalidUtf8`] if the recovered bytes are not text.
pub fn decrypt(ciphertext_b64: &str, iv_hex: &str, key_hex: &str) -> Result<String, CryptoError> {
    let key = decode_key(key_hex)?;
    let iv = decode_nonce(iv_hex, IV_LEN)?;
    let ciphertext = decode_ciphertext(ciphertext_b64)?;
    let cipher = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::CbcFailure)?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
}
