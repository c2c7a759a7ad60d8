//! Key material resolution.
//!
//! Turns a configuration snapshot into the key needed for one encrypt or
//! decrypt. Asymmetric keys take precedence over the symmetric key; each
//! direction is resolved independently and nothing is cached.

use std::fmt;
use std::fs;
use std::path::Path;

use age::x25519;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::config::KeychainConfig;
use crate::core::constants::SYMMETRIC_KEY_LEN;
use crate::error::{KeyError, Result};

/// Shared secret for symmetric mode.
#[derive(Clone)]
pub struct SymmetricKey(Zeroizing<[u8; SYMMETRIC_KEY_LEN]>);

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; SYMMETRIC_KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Parse a key value: URL-safe base64 (padded) of exactly 32 bytes.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidSymmetricKey` on bad characters or length.
    pub fn parse(value: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(value.trim())
                .map_err(|e| KeyError::InvalidSymmetricKey(e.to_string()))?,
        );

        if decoded.len() != SYMMETRIC_KEY_LEN {
            return Err(KeyError::InvalidSymmetricKey(format!(
                "expected {} bytes, got {}",
                SYMMETRIC_KEY_LEN,
                decoded.len()
            ))
            .into());
        }

        let mut bytes = [0u8; SYMMETRIC_KEY_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Which family of transform a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Symmetric,
    Asymmetric,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric => f.write_str("symmetric"),
            Self::Asymmetric => f.write_str("asymmetric"),
        }
    }
}

/// Key material usable for encryption.
pub enum EncryptKey {
    Symmetric(SymmetricKey),
    Public(x25519::Recipient),
}

impl EncryptKey {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Symmetric(_) => Mode::Symmetric,
            Self::Public(_) => Mode::Asymmetric,
        }
    }
}

impl fmt::Debug for EncryptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric(key) => f.debug_tuple("Symmetric").field(key).finish(),
            Self::Public(recipient) => write!(f, "Public({})", recipient),
        }
    }
}

/// Key material usable for decryption.
pub enum DecryptKey {
    Symmetric(SymmetricKey),
    Private(x25519::Identity),
}

impl DecryptKey {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Symmetric(_) => Mode::Symmetric,
            Self::Private(_) => Mode::Asymmetric,
        }
    }
}

impl fmt::Debug for DecryptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric(key) => f.debug_tuple("Symmetric").field(key).finish(),
            Self::Private(_) => f.write_str("Private(..)"),
        }
    }
}

/// Resolve the key to encrypt with.
///
/// A configured public key wins over a symmetric key.
///
/// # Errors
///
/// Returns `KeyError::NotConfigured` if neither is configured, or a loading
/// error if the configured key cannot be used.
pub fn resolve_for_encrypt(config: &KeychainConfig) -> Result<EncryptKey> {
    if let Some(path) = config.public_key_path() {
        debug!(path = %path.display(), "resolving public key");
        return load_recipient(path).map(EncryptKey::Public);
    }

    if let Some(value) = config.symmetric_key() {
        debug!("resolving symmetric key for encryption");
        return SymmetricKey::parse(value).map(EncryptKey::Symmetric);
    }

    Err(KeyError::NotConfigured.into())
}

/// Resolve the key to decrypt with.
///
/// A configured private key wins over a symmetric key.
///
/// # Errors
///
/// Returns `KeyError::NotConfigured` if neither is configured, or a loading
/// error if the configured key cannot be used.
pub fn resolve_for_decrypt(config: &KeychainConfig) -> Result<DecryptKey> {
    if let Some(path) = config.private_key_path() {
        debug!(path = %path.display(), "resolving private key");
        return load_identity(path).map(DecryptKey::Private);
    }

    if let Some(value) = config.symmetric_key() {
        debug!("resolving symmetric key for decryption");
        return SymmetricKey::parse(value).map(DecryptKey::Symmetric);
    }

    Err(KeyError::NotConfigured.into())
}

/// Load an age public key (`age1...`) from a file.
///
/// # Errors
///
/// Returns `KeyError::Unreadable` or `KeyError::InvalidFormat`.
pub fn load_recipient(path: &Path) -> Result<x25519::Recipient> {
    let contents = read_key_file(path)?;
    let line = first_key_line(&contents).ok_or_else(|| KeyError::InvalidFormat {
        path: path.to_path_buf(),
        reason: "no key found".to_string(),
    })?;

    line.parse::<x25519::Recipient>().map_err(|e: &str| {
        KeyError::InvalidFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Load an age private key (`AGE-SECRET-KEY-1...`) from a file.
///
/// # Errors
///
/// Returns `KeyError::Unreadable` or `KeyError::InvalidFormat`.
pub fn load_identity(path: &Path) -> Result<x25519::Identity> {
    #[cfg(unix)]
    warn_if_exposed(path);

    let contents = read_key_file(path)?;
    let line = first_key_line(&contents).ok_or_else(|| KeyError::InvalidFormat {
        path: path.to_path_buf(),
        reason: "no key found".to_string(),
    })?;

    line.parse::<x25519::Identity>().map_err(|e: &str| {
        KeyError::InvalidFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn read_key_file(path: &Path) -> Result<Zeroizing<String>> {
    let bytes = fs::read(path).map_err(|source| KeyError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map(Zeroizing::new).map_err(|_| {
        KeyError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "not UTF-8 text".to_string(),
        }
        .into()
    })
}

/// First line that is neither blank nor an `age-keygen` style `#` comment.
fn first_key_line(contents: &str) -> Option<&str> {
    contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
}

#[cfg(unix)]
fn warn_if_exposed(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure key file permissions"
            );
        }
    }
}
