//! Command-line interface.

pub mod check;
pub mod credentials;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::config::{ConfigSource, FileSource, KeychainConfig};
use crate::core::constants;
use crate::core::keychain::Keychain;
use crate::core::validation::NamespaceRegistry;
use crate::error::Result;

/// Keychain - a namespaced credential vault.
#[derive(Parser)]
#[command(
    name = "keychain",
    about = "Store namespaced credentials encrypted at rest",
    version
)]
pub struct Cli {
    /// Config file (default: ~/.keychain/config.toml)
    #[arg(long, global = true, env = "KEYCHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate, encrypt and store credentials on an account record
    Set {
        /// Account record file (JSON)
        account: PathBuf,
        /// Namespace for a new account record
        #[arg(short, long)]
        namespace: Option<String>,
        /// Credentials as a JSON object (read from stdin if omitted)
        value: Option<String>,
    },

    /// Decrypt and print the credentials of an account record
    Get {
        /// Account record file (JSON)
        account: PathBuf,
    },

    /// Show which keys encryption and decryption currently resolve to
    Check,
}

/// Execute a command.
pub fn execute(command: Command, config: Option<PathBuf>) -> Result<()> {
    let keychain = open(config)?;

    match command {
        Command::Set {
            account,
            namespace,
            value,
        } => credentials::set(&keychain, &account, namespace.as_deref(), value),
        Command::Get { account } => credentials::get(&keychain, &account),
        Command::Check => check::execute(&keychain),
    }
}

/// Build a keychain over the config file, with namespace rules from its
/// `[namespaces]` tables registered.
fn open(config: Option<PathBuf>) -> Result<Keychain<FileSource>> {
    let path = config
        .or_else(KeychainConfig::default_path)
        .unwrap_or_else(|| PathBuf::from(constants::CONFIG_FILE));

    let source = FileSource::new(path).with_env_overrides();
    debug!(path = %source.path().display(), "using config");
    let registry = NamespaceRegistry::new();
    for (namespace, rule) in source.snapshot()?.namespaces {
        registry.register_rule(namespace, rule);
    }

    Ok(Keychain::new(source, Arc::new(registry)))
}
