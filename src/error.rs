//! Error types.
//!
//! Every failure falls into one of three kinds (see [`ErrorKind`]):
//! bad input, operational/crypto trouble, or a defect that should never be
//! swallowed.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for keychain operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("account record error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used by callers to decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The submitted secret is invalid. Nothing was touched.
    Validation,
    /// Key material or a crypto transform failed. Fix configuration and retry.
    Operational,
    /// Unclassified failure.
    Fatal,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Key(_) | Self::Cipher(_) => ErrorKind::Operational,
            Self::Config(ConfigError::ReadFile { .. } | ConfigError::Parse { .. }) => {
                ErrorKind::Operational
            }
            Self::Config(ConfigError::UnknownNamespace(_) | ConfigError::AccountNotFound(_)) => {
                ErrorKind::Fatal
            }
            Self::Io(_) | Self::Json(_) => ErrorKind::Fatal,
        }
    }

    /// Shorthand for `kind() == ErrorKind::Validation`.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Shorthand for `kind() == ErrorKind::Operational`.
    pub fn is_operational(&self) -> bool {
        self.kind() == ErrorKind::Operational
    }
}

/// Rejected secret payloads.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("credentials are not well-formed JSON: {0}")]
    MalformedJson(String),

    #[error("credentials must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("credentials rejected by the '{namespace}' validator")]
    Rejected { namespace: String },
}

/// Key material resolution and loading failures.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("no encryption key configured")]
    NotConfigured,

    #[error("cannot read key file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid key in {}: {reason}", .path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("invalid symmetric key: {0}")]
    InvalidSymmetricKey(String),
}

/// Failures inside the encrypt/decrypt transforms.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("verification failed: wrong key or tampered credentials")]
    VerificationFailed,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("stored credentials are not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

/// Configuration and registry errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no validator registered for namespace '{0}'")]
    UnknownNamespace(String),

    #[error("account record not found: {}", .0.display())]
    AccountNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
