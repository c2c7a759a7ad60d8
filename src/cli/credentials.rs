//! `set` and `get` commands.

use std::io::{IsTerminal, Read};
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::account::Account;
use crate::core::config::ConfigSource;
use crate::core::keychain::Keychain;
use crate::error::{ConfigError, Result};

/// Store credentials on the account record at `path`.
///
/// Creates the record when it does not exist yet; `namespace` is required
/// then. Without `value`, credentials are read from stdin unless stdin is a
/// terminal. An empty value leaves the record unchanged.
pub fn set<S: ConfigSource>(
    keychain: &Keychain<S>,
    path: &Path,
    namespace: Option<&str>,
    value: Option<String>,
) -> Result<()> {
    let mut account = if path.exists() {
        let account = Account::load(path)?;
        if let Some(ns) = namespace {
            if ns != account.namespace() {
                output::warn(&format!(
                    "ignoring --namespace {}: record belongs to '{}'",
                    ns,
                    account.namespace()
                ));
            }
        }
        account
    } else {
        let ns = namespace.ok_or_else(|| ConfigError::AccountNotFound(path.to_path_buf()))?;
        keychain.create_account(ns)?
    };

    let raw = match value {
        Some(value) => Zeroizing::new(value),
        None => read_stdin()?,
    };

    if raw.is_empty() {
        output::dimmed("no credentials given, record unchanged");
        return Ok(());
    }

    keychain.set_credentials(&mut account, Some(raw.as_str()))?;
    account.save(path)?;

    output::success(&format!(
        "credentials stored for '{}' in {}",
        account.namespace(),
        output::path(path)
    ));
    Ok(())
}

/// Print the decrypted credentials of the account record at `path`.
///
/// Prints nothing when the record holds no credentials.
pub fn get<S: ConfigSource>(keychain: &Keychain<S>, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ConfigError::AccountNotFound(path.to_path_buf()).into());
    }

    let account = Account::load(path)?;
    match keychain.get_credentials(&account)? {
        Some(plaintext) => println!("{}", plaintext.as_str()),
        None => debug!(path = %path.display(), "no credentials stored"),
    }
    Ok(())
}

/// Read credentials from stdin, dropping one trailing newline.
fn read_stdin() -> Result<Zeroizing<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(Zeroizing::new(String::new()));
    }

    let mut buf = Zeroizing::new(String::new());
    stdin.read_to_string(&mut buf)?;

    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}
