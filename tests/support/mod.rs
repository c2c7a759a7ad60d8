//! Test support utilities for keychain integration tests.
//!
//! Provides isolated key material, a shared registry, and a keychain wired
//! to a mutable in-process configuration.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use commands::{assert_stdout_contains, assert_success, stderr, stdout};

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use age::secrecy::ExposeSecret;
use age::x25519;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use keychain::{Account, Keychain, KeychainConfig, NamespaceRegistry, SharedConfig};
use rand::RngCore;
use tempfile::TempDir;

/// Test environment with its own key directory and configuration.
///
/// `config` is shared with `keychain`, so changing it between calls is seen
/// by the next call, the same way an edited config file would be.
pub struct Test {
    /// Temporary directory for key files, config and account records
    pub dir: TempDir,
    /// Configuration the keychain reads from
    pub config: SharedConfig,
    /// Keychain under test
    pub keychain: Keychain<SharedConfig>,
}

impl Test {
    /// Create an environment with no key material configured.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let config = SharedConfig::default();
        let keychain = Keychain::new(config.clone(), registry());

        Self {
            dir,
            config,
            keychain,
        }
    }

    /// Create an environment with a fresh symmetric key configured.
    pub fn symmetric() -> Self {
        let t = Self::new();
        let key = random_key();
        t.config.update(|c| c.key = Some(key));
        t
    }

    /// Create an environment with a fresh age keypair configured.
    pub fn asymmetric() -> Self {
        let t = Self::new();
        let (public, private) = t.write_keypair("test");
        t.config.update(|c| {
            c.public_key = Some(public);
            c.private_key = Some(private);
        });
        t
    }

    /// New empty account in the test namespace.
    pub fn account(&self) -> Account {
        self.keychain
            .create_account(TEST_NAMESPACE)
            .expect("test namespace should be registered")
    }

    /// Current configuration snapshot.
    pub fn snapshot(&self) -> KeychainConfig {
        use keychain::ConfigSource;
        self.config.snapshot().expect("shared config never fails")
    }

    /// Generate an age keypair and write `<name>.pub` / `<name>.key`.
    pub fn write_keypair(&self, name: &str) -> (PathBuf, PathBuf) {
        let identity = x25519::Identity::generate();
        let public = self.dir.path().join(format!("{}.pub", name));
        let private = self.dir.path().join(format!("{}.key", name));

        fs::write(&public, format!("{}\n", identity.to_public())).unwrap();
        fs::write(
            &private,
            format!(
                "# public key: {}\n{}\n",
                identity.to_public(),
                identity.to_string().expose_secret()
            ),
        )
        .unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&private, fs::Permissions::from_mode(0o600)).unwrap();
        }

        (public, private)
    }

    /// Path inside the test directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Registry with the test namespace: objects with one or two keys.
pub fn registry() -> Arc<NamespaceRegistry> {
    let registry = NamespaceRegistry::new();
    registry.register(TEST_NAMESPACE, |payload| (1..3).contains(&payload.len()));
    Arc::new(registry)
}

/// A fresh random symmetric key value.
pub fn random_key() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE.encode(bytes)
}
