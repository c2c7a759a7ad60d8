//! Credential controller.
//!
//! Every read and write of a secret goes through [`Keychain`]: input is
//! parsed and validated first, then key material is resolved from a fresh
//! configuration snapshot, then the codec runs. The account is only touched
//! once every step has succeeded.

use std::sync::Arc;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::account::Account;
use crate::core::cipher;
use crate::core::config::ConfigSource;
use crate::core::keys;
use crate::core::validation::{parse_payload, NamespaceRegistry};
use crate::error::{ConfigError, Result, ValidationError};

/// Orchestrates validation, key resolution and encryption for accounts.
pub struct Keychain<S> {
    source: S,
    registry: Arc<NamespaceRegistry>,
}

impl<S: ConfigSource> Keychain<S> {
    pub fn new(source: S, registry: Arc<NamespaceRegistry>) -> Self {
        Self { source, registry }
    }

    /// Namespace validators in use
    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    /// Configuration source in use
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Create an empty account for `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownNamespace` if no validator is registered.
    pub fn create_account(&self, namespace: &str) -> Result<Account> {
        if !self.registry.is_registered(namespace) {
            return Err(ConfigError::UnknownNamespace(namespace.to_string()).into());
        }
        debug!(namespace = %namespace, "account created");
        Ok(Account::new(namespace))
    }

    /// Validate, encrypt and store a secret on `account`.
    ///
    /// `None` or an empty string leaves the account untouched. The exact input
    /// text is what gets encrypted.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `raw` is not a JSON object accepted by
    /// the namespace validator, before any key is looked at. Returns a
    /// `KeyError`, `CipherError` or config read error if encryption cannot be
    /// done. In every error case the account is unchanged.
    pub fn set_credentials(&self, account: &mut Account, raw: Option<&str>) -> Result<()> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                debug!(namespace = %account.namespace(), "no credentials given, nothing to do");
                return Ok(());
            }
        };

        let payload = parse_payload(raw)?;
        if !self.registry.validate(account.namespace(), &payload)? {
            return Err(ValidationError::Rejected {
                namespace: account.namespace().to_string(),
            }
            .into());
        }
        debug!(namespace = %account.namespace(), keys = payload.len(), "credentials validated");

        let config = self.source.snapshot()?;
        let key = keys::resolve_for_encrypt(&config)?;
        let ciphertext = cipher::seal(raw, &key)?;

        account.store(ciphertext, raw);
        debug!(namespace = %account.namespace(), mode = %key.mode(), "credentials stored");

        Ok(())
    }

    /// Decrypt the secret stored on `account`.
    ///
    /// Always decrypts the stored ciphertext, even when the plaintext of an
    /// earlier write is still cached on the account.
    ///
    /// # Returns
    ///
    /// `None` if no secret is stored.
    ///
    /// # Errors
    ///
    /// Returns a `KeyError` or `CipherError` if no usable key is configured or
    /// the ciphertext cannot be decrypted with it.
    pub fn get_credentials(&self, account: &Account) -> Result<Option<Zeroizing<String>>> {
        let encoded = match account.credentials() {
            Some(encoded) if !encoded.is_empty() => encoded,
            _ => return Ok(None),
        };

        let config = self.source.snapshot()?;
        let key = keys::resolve_for_decrypt(&config)?;
        let plaintext = cipher::open(encoded, &key)?;

        debug!(namespace = %account.namespace(), mode = %key.mode(), "credentials read");
        Ok(Some(plaintext))
    }
}
