//! XChaCha20-Poly1305 (IETF) authenticated encryption.
//!
//! Associated data is authenticated but not encrypted. The 192-bit nonce is
//! supplied by the caller; **reusing a nonce under the same key breaks
//! confidentiality**. Nothing here can detect reuse, the caller owns that
//! invariant.
//!
//! # Ciphertext format
//!
//! ```text
//! base64(ciphertext || tag)      standard alphabet, padded
//! ```

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};

use super::codec::{decode_ciphertext, decode_key, decode_nonce, encode_ciphertext};
use super::{CryptoError, KEY_LEN};

/// Byte length of an XChaCha20 nonce (24 bytes = 192 bits).
pub const NONCE_LEN: usize = 24;

/// Byte length of the Poly1305 tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Seal raw bytes. Returns `ciphertext || tag`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] or
/// [`CryptoError::InvalidNonceLength`] for wrongly sized inputs.
pub fn seal(key: &[u8], nonce: &[u8], msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = build_cipher(key)?;
    check_nonce(nonce)?;
    cipher
        .encrypt(XNonce::from_slice(nonce), Payload { msg, aad })
        .map_err(|_| CryptoError::AeadFailure)
}

/// Open raw `ciphertext || tag` bytes.
///
/// # Errors
///
/// Returns [`CryptoError::AeadFailure`] if authentication fails for any reason
/// (wrong key, wrong nonce, tampered ciphertext, or wrong associated data).
pub fn open(key: &[u8], nonce: &[u8], sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = build_cipher(key)?;
    check_nonce(nonce)?;
    cipher
        .decrypt(XNonce::from_slice(nonce), Payload { msg: sealed, aad })
        .map_err(|_| CryptoError::AeadFailure)
}

/// Encrypt a UTF-8 plaintext with a hex key and hex nonce.
pub fn encrypt(
    plaintext: &str,
    nonce_hex: &str,
    key_hex: &str,
    associated_data: &str,
) -> Result<String, CryptoError> {
    let key = decode_key(key_hex)?;
    let nonce = decode_nonce(nonce_hex, NONCE_LEN)?;
    let sealed = seal(&key, &nonce, plaintext.as_bytes(), associated_data.as_bytes())?;
    Ok(encode_ciphertext(&sealed))
}

/// Decrypt a base64 ciphertext produced by [`encrypt`] back to UTF-8.
pub fn decrypt(
    ciphertext_b64: &str,
    nonce_hex: &str,
    key_hex: &str,
    associated_data: &str,
) -> Result<String, CryptoError> {
    let key = decode_key(key_hex)?;
    let nonce = decode_nonce(nonce_hex, NONCE_LEN)?;
    let sealed = decode_ciphertext(ciphertext_b64)?;
    let plaintext = open(&key, &nonce, &sealed, associated_data.as_bytes())?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
}

fn build_cipher(key: &[u8]) -> Result<XChaCha20Poly1305, CryptoError> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyLength(key.len()));
    }
    XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength(key.len()))
}

fn check_nonce(nonce: &[u8]) -> Result<(), CryptoError> {
    if nonce.len() != NONCE_LEN {
        return Err(CryptoError::InvalidNonceLength {
            expected: NONCE_LEN,
            actual: nonce.len(),
        });
    }
    Ok(())
}
