//! Key material configuration.
//!
//! The keychain never holds on to key material: every operation asks a
//! [`ConfigSource`] for a fresh [`KeychainConfig`] snapshot, so a key that is
//! removed or swapped between two calls is observed by the second call.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::validation::NamespaceRule;
use crate::error::{ConfigError, Result};

/// Process-wide key material configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeychainConfig {
    /// Symmetric key value (URL-safe base64 of 32 bytes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Path to the age public key file used for encryption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PathBuf>,
    /// Path to the age private key file used for decryption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<PathBuf>,
    /// Declarative namespace validators
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub namespaces: BTreeMap<String, NamespaceRule>,
}

impl KeychainConfig {
    /// Parse a configuration from TOML text.
    ///
    /// `path` is only used for error messages.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Load a configuration file.
    ///
    /// A missing file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file exists but cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("config file absent, using empty config");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents, path)
    }

    /// Overlay `KEYCHAIN_KEY`, `KEYCHAIN_PUBLIC_KEY` and `KEYCHAIN_PRIVATE_KEY`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(constants::ENV_KEY) {
            self.key = Some(key);
        }
        if let Ok(path) = std::env::var(constants::ENV_PUBLIC_KEY) {
            self.public_key = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(constants::ENV_PRIVATE_KEY) {
            self.private_key = Some(PathBuf::from(path));
        }
        self
    }

    /// Symmetric key value, treating an empty or blank value as unset.
    pub fn symmetric_key(&self) -> Option<&str> {
        self.key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Public key file path, treating an empty path as unset.
    pub fn public_key_path(&self) -> Option<&Path> {
        non_empty(self.public_key.as_deref())
    }

    /// Private key file path, treating an empty path as unset.
    pub fn private_key_path(&self) -> Option<&Path> {
        non_empty(self.private_key.as_deref())
    }

    /// Default config file location: `~/.keychain/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Supplies configuration snapshots.
///
/// Implementations must return the current state on every call; the keychain
/// relies on this to pick up key changes between a write and a later read.
pub trait ConfigSource {
    /// Take a snapshot of the current configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the underlying configuration cannot be read.
    fn snapshot(&self) -> Result<KeychainConfig>;
}

impl ConfigSource for KeychainConfig {
    fn snapshot(&self) -> Result<KeychainConfig> {
        Ok(self.clone())
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Arc<S> {
    fn snapshot(&self) -> Result<KeychainConfig> {
        (**self).snapshot()
    }
}

/// In-process configuration that can be changed at runtime.
///
/// Clones share the same underlying configuration.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<KeychainConfig>>,
}

impl SharedConfig {
    pub fn new(config: KeychainConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Mutate the configuration in place.
    pub fn update(&self, f: impl FnOnce(&mut KeychainConfig)) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }

    /// Replace the configuration.
    pub fn replace(&self, config: KeychainConfig) {
        self.update(|current| *current = config);
    }
}

impl ConfigSource for SharedConfig {
    fn snapshot(&self) -> Result<KeychainConfig> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }
}

/// Configuration read from a TOML file on every snapshot.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    env_overrides: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_overrides: false,
        }
    }

    /// Apply `KEYCHAIN_*` environment overrides on top of the file.
    pub fn with_env_overrides(mut self) -> Self {
        self.env_overrides = true;
        self
    }

    /// Config file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn snapshot(&self) -> Result<KeychainConfig> {
        let config = KeychainConfig::load(&self.path)?;
        if self.env_overrides {
            Ok(config.with_env_overrides())
        } else {
            Ok(config)
        }
    }
}
