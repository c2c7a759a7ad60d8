//! Age encryption backend implementation.
//!
//! Provides encryption/decryption using the binary age format with x25519
//! keys. The base64 layer above takes care of making it printable.

use std::io::{Read, Write};

use ::age::x25519;
use tracing::trace;

use super::Cipher;
use crate::error::{CipherError, Result};

/// Age-based cryptographic backend using x25519 keys
pub struct Age;

impl Cipher for Age {
    type EncryptKey = x25519::Recipient;
    type DecryptKey = x25519::Identity;

    fn name(&self) -> &'static str {
        "age"
    }

    fn encrypt(&self, plaintext: &[u8], recipient: &x25519::Recipient) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(recipient as &dyn age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        writer
            .write_all(plaintext)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");
        Ok(encrypted)
    }

    fn decrypt(&self, ciphertext: &[u8], identity: &x25519::Identity) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let decryptor = age::Decryptor::new(ciphertext)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut decrypted = Vec::new();
        let mut reader = decryptor
            .decrypt(std::iter::once(identity as &dyn age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");
        Ok(decrypted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let identity = x25519::Identity::generate();
        let recipient = identity.to_public();

        let plaintext = br#"{"token": "djkqfljfqm"}"#;
        let encrypted = Age.encrypt(plaintext, &recipient).unwrap();

        assert_ne!(encrypted.as_slice(), plaintext.as_slice());
        assert!(encrypted.starts_with(b"age-encryption.org/v1"));

        let decrypted = Age.decrypt(&encrypted, &identity).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_encrypt_decrypt_large_payload() {
        let identity = x25519::Identity::generate();

        let plaintext = "A".repeat(10_000);
        let encrypted = Age.encrypt(plaintext.as_bytes(), &identity.to_public()).unwrap();

        let decrypted = Age.decrypt(&encrypted, &identity).unwrap();
        assert_eq!(decrypted.len(), 10_000);
    }

    #[test]
    fn test_other_identity_cannot_decrypt() {
        let owner = x25519::Identity::generate();
        let stranger = x25519::Identity::generate();

        let encrypted = Age.encrypt(b"{\"x\": 1}", &owner.to_public()).unwrap();
        assert!(matches!(
            Age.decrypt(&encrypted, &stranger),
            Err(crate::error::Error::Cipher(CipherError::DecryptionFailed(_)))
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let identity = x25519::Identity::generate();
        assert!(Age.decrypt(b"not an age file", &identity).is_err());
    }
}
