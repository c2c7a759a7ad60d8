//! Account entity.
//!
//! An account ties one secret to a namespace. Only the ciphertext is ever
//! persisted; the plaintext of the last accepted secret is kept in memory for
//! the lifetime of the value and is gone once the record is reloaded.

use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::Result;

/// A namespaced credential record.
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    namespace: String,
    /// Base64 ciphertext
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credentials: Option<String>,
    /// Raw text of the most recently set secret; never persisted
    #[serde(skip)]
    credentials_input: Option<Zeroizing<String>>,
}

impl Account {
    /// Create an empty account.
    ///
    /// Prefer [`Keychain::create_account`](crate::core::keychain::Keychain::create_account),
    /// which checks that the namespace has a validator.
    pub(crate) fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            credentials: None,
            credentials_input: None,
        }
    }

    /// Namespace this account belongs to
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Stored ciphertext (base64), if any
    pub fn credentials(&self) -> Option<&str> {
        self.credentials.as_deref()
    }

    /// Raw text of the last secret set through this value, if any
    pub fn credentials_input(&self) -> Option<&str> {
        self.credentials_input.as_ref().map(|s| s.as_str())
    }

    /// Whether a ciphertext is stored
    pub fn has_credentials(&self) -> bool {
        self.credentials.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Commit a successful write. Both fields change together.
    pub(crate) fn store(&mut self, ciphertext: String, raw: &str) {
        self.credentials = Some(ciphertext);
        self.credentials_input = Some(Zeroizing::new(raw.to_string()));
    }

    /// Load an account record from a JSON file.
    ///
    /// The in-memory plaintext cache always starts empty.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or a JSON error if the
    /// record is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading account");
        let contents = std::fs::read_to_string(path)?;
        let account: Self = serde_json::from_str(&contents)?;
        Ok(account)
    }

    /// Save the account record as JSON.
    ///
    /// The record is written to a temporary file next to `path` and renamed
    /// over it, so an interrupted save leaves the previous record intact.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), namespace = %self.namespace, "saving account");
        let contents = serde_json::to_string_pretty(self)?;

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("namespace", &self.namespace)
            .field("credentials", &self.credentials.as_ref().map(|_| ".."))
            .field(
                "credentials_input",
                &self.credentials_input.as_ref().map(|_| ".."),
            )
            .finish()
    }
}
