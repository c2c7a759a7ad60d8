//! Symmetric backend.
//!
//! AES-256-GCM tokens laid out as
//! `version (1) | issued-at seconds, big endian (8) | nonce (12) | ciphertext+tag`.
//! The version byte and timestamp are authenticated as associated data.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng, Payload},
    Aes256Gcm, Nonce,
};
use tracing::trace;

use super::Cipher;
use crate::core::keys::SymmetricKey;
use crate::error::{CipherError, Result};

const VERSION: u8 = 0x80;
const HEADER_LEN: usize = 1 + 8;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// AES-256-GCM backend using a shared key.
pub struct Symmetric;

impl Symmetric {
    fn cipher(key: &SymmetricKey) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)).into())
    }
}

impl Cipher for Symmetric {
    type EncryptKey = SymmetricKey;
    type DecryptKey = SymmetricKey;

    fn name(&self) -> &'static str {
        "symmetric"
    }

    fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let cipher = Self::cipher(key)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let mut header = Vec::with_capacity(HEADER_LEN);
        header.push(VERSION);
        header.extend_from_slice(&chrono::Utc::now().timestamp().to_be_bytes());

        let ciphertext = cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext,
                    aad: &header,
                },
            )
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let mut token = header;
        token.extend_from_slice(nonce.as_slice());
        token.extend_from_slice(&ciphertext);

        trace!(token_len = token.len(), "encrypted");
        Ok(token)
    }

    fn decrypt(&self, token: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        trace!(token_len = token.len(), "decrypting");

        if token.len() < HEADER_LEN + NONCE_LEN + TAG_LEN {
            return Err(CipherError::InvalidToken("token too short".to_string()).into());
        }
        if token[0] != VERSION {
            return Err(CipherError::InvalidToken(format!(
                "unknown token version 0x{:02x}",
                token[0]
            ))
            .into());
        }

        let (header, rest) = token.split_at(HEADER_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        let cipher = Self::cipher(key)?;
        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: header,
                },
            )
            .map_err(|_| CipherError::VerificationFailed)?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(plaintext)
    }
}
