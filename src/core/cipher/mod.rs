//! Cryptographic operations.
//!
//! Two backends, selected by the kind of key the resolver hands out:
//!
//! - **Symmetric**: AES-256-GCM token under a shared 32-byte key.
//! - **age**: x25519 public-key encryption. Encrypting needs only the
//!   recipient, decrypting only the identity.
//!
//! Ciphertext is stored as standard base64 text whatever the backend. No mode
//! tag is stored; a ciphertext opened with the other mode's key fails.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::keys::{DecryptKey, EncryptKey};
use crate::error::{CipherError, Result};

mod age;
mod symmetric;

pub use age::Age;
pub use symmetric::Symmetric;

/// Cryptographic backend trait.
///
/// Operates on raw bytes; text encoding is handled by [`seal`] and [`open`].
pub trait Cipher {
    /// Key needed to encrypt.
    type EncryptKey;

    /// Key needed to decrypt.
    type DecryptKey;

    /// Encrypt plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if encryption fails.
    fn encrypt(&self, plaintext: &[u8], key: &Self::EncryptKey) -> Result<Vec<u8>>;

    /// Decrypt ciphertext bytes.
    ///
    /// # Errors
    ///
    /// Returns a `CipherError` if the ciphertext is malformed or the key
    /// does not match.
    fn decrypt(&self, ciphertext: &[u8], key: &Self::DecryptKey) -> Result<Vec<u8>>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Encrypt `plaintext` with whichever backend `key` belongs to and encode
/// the result as base64.
///
/// # Errors
///
/// Returns `CipherError` if encryption fails.
pub fn seal(plaintext: &str, key: &EncryptKey) -> Result<String> {
    let (backend, ciphertext) = match key {
        EncryptKey::Symmetric(key) => (
            Symmetric.name(),
            Symmetric.encrypt(plaintext.as_bytes(), key)?,
        ),
        EncryptKey::Public(recipient) => {
            (Age.name(), Age.encrypt(plaintext.as_bytes(), recipient)?)
        }
    };

    debug!(backend, ciphertext_len = ciphertext.len(), "sealed");
    Ok(STANDARD.encode(ciphertext))
}

/// Decode base64 `encoded` and decrypt it with `key`.
///
/// # Errors
///
/// Returns `CipherError::InvalidEncoding` for malformed base64, and other
/// `CipherError` variants if decryption fails or the plaintext is not UTF-8.
pub fn open(encoded: &str, key: &DecryptKey) -> Result<Zeroizing<String>> {
    let ciphertext = STANDARD
        .decode(encoded.trim())
        .map_err(CipherError::InvalidEncoding)?;

    let (backend, plaintext) = match key {
        DecryptKey::Symmetric(key) => (Symmetric.name(), Symmetric.decrypt(&ciphertext, key)?),
        DecryptKey::Private(identity) => (Age.name(), Age.decrypt(&ciphertext, identity)?),
    };

    debug!(backend, plaintext_len = plaintext.len(), "opened");

    String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
        let mut bytes = e.into_bytes();
        zeroize::Zeroize::zeroize(&mut bytes);
        CipherError::DecryptionFailed("plaintext is not UTF-8".to_string()).into()
    })
}
