//! Keychain - a namespaced credential vault.
//!
//! Secrets are JSON objects attached to a namespace (the external service
//! they belong to). They are validated by a per-namespace predicate and
//! encrypted before they are stored; plaintext never reaches persistence.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── credentials   # set / get
//! │   ├── check         # key configuration report
//! │   └── output        # terminal output helpers
//! └── core/             # Core library components
//!     ├── account       # Account entity
//!     ├── cipher/       # Encryption backends
//!     │   ├── mod       # Cipher trait, base64 seal/open
//!     │   ├── symmetric # AES-256-GCM tokens
//!     │   └── age       # age x25519 encryption
//!     ├── config        # Key material configuration sources
//!     ├── keys          # Key resolution and loading
//!     ├── keychain      # set_credentials / get_credentials
//!     └── validation    # JSON payload parsing, namespace registry
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use keychain::{FileSource, Keychain, NamespaceRegistry};
//!
//! # fn main() -> keychain::Result<()> {
//! let registry = NamespaceRegistry::new();
//! registry.register("github", |payload| payload.contains_key("token"));
//!
//! let keychain = Keychain::new(
//!     FileSource::new("/etc/keychain/config.toml").with_env_overrides(),
//!     Arc::new(registry),
//! );
//!
//! let mut account = keychain.create_account("github")?;
//! keychain.set_credentials(&mut account, Some(r#"{"token": "ghp_..."}"#))?;
//! let secret = keychain.get_credentials(&account)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::account::Account;
pub use crate::core::config::{ConfigSource, FileSource, KeychainConfig, SharedConfig};
pub use crate::core::keychain::Keychain;
pub use crate::core::keys::Mode;
pub use crate::core::validation::{NamespaceRegistry, NamespaceRule, Payload};
pub use crate::error::{Error, ErrorKind, Result};
