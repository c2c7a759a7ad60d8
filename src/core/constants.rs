//! Constants used throughout keychain.
//!
//! Centralizes environment variable names and file locations.

/// Environment variable overriding the symmetric key value.
pub const ENV_KEY: &str = "KEYCHAIN_KEY";

/// Environment variable overriding the public key file path.
pub const ENV_PUBLIC_KEY: &str = "KEYCHAIN_PUBLIC_KEY";

/// Environment variable overriding the private key file path.
pub const ENV_PRIVATE_KEY: &str = "KEYCHAIN_PRIVATE_KEY";

/// Environment variable holding the tracing filter.
pub const ENV_LOG: &str = "KEYCHAIN_LOG";

/// Config directory relative to HOME (~/.keychain).
pub const CONFIG_DIR: &str = ".keychain";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Length in bytes of a symmetric key.
pub const SYMMETRIC_KEY_LEN: usize = 32;
