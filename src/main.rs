//! Keychain - a namespaced credential vault.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keychain::cli::output;
use keychain::cli::{execute, Cli};
use keychain::core::constants;
use keychain::error::{CipherError, ConfigError, Error, ErrorKind, KeyError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keychain=debug")
        } else {
            EnvFilter::new("keychain=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        let suggestion = match &e {
            Error::Validation(_) => {
                Some("credentials must be a JSON object accepted by the namespace")
            }
            Error::Key(KeyError::NotConfigured) => {
                Some("set KEYCHAIN_KEY, or public_key/private_key in the config file")
            }
            Error::Cipher(CipherError::VerificationFailed) => {
                Some("the configured key is not the one the credentials were stored with")
            }
            Error::Config(ConfigError::AccountNotFound(_)) => {
                Some("pass --namespace to create a new account record")
            }
            Error::Config(ConfigError::UnknownNamespace(_)) => {
                Some("add a [namespaces.<name>] table to the config file")
            }
            _ => None,
        };

        match e.kind() {
            ErrorKind::Operational => output::warn(&e.to_string()),
            _ => output::error(&e.to_string()),
        }
        if let Some(hint) = suggestion {
            output::hint(hint);
        }

        let code = if e.kind() == ErrorKind::Validation { 2 } else { 1 };
        std::process::exit(code);
    }
}
