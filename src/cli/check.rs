//! `check` command: report the current key configuration.

use crate::cli::output;
use crate::core::config::ConfigSource;
use crate::core::keychain::Keychain;
use crate::core::keys;
use crate::error::Result;

/// Show which key encryption and decryption resolve to right now, and the
/// registered namespaces.
///
/// Key problems are reported, not returned; only an unreadable config fails.
pub fn execute<S: ConfigSource>(keychain: &Keychain<S>) -> Result<()> {
    let config = keychain.source().snapshot()?;

    output::header("Keys");
    match keys::resolve_for_encrypt(&config) {
        Ok(key) => output::kv("encrypt:", key.mode()),
        Err(e) => output::kv("encrypt:", format!("unavailable ({})", e)),
    }
    match keys::resolve_for_decrypt(&config) {
        Ok(key) => output::kv("decrypt:", key.mode()),
        Err(e) => output::kv("decrypt:", format!("unavailable ({})", e)),
    }

    println!();
    output::header("Namespaces");
    let namespaces = keychain.registry().namespaces();
    if namespaces.is_empty() {
        output::dimmed("  none registered");
    } else {
        for ns in &namespaces {
            output::list_item(ns);
        }
    }

    Ok(())
}
