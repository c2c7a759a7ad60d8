//! Command helpers for CLI tests.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a keychain command isolated from the user's environment.
    ///
    /// Uses `config.toml` in the test directory and clears the `KEYCHAIN_*`
    /// overrides.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keychain").expect("failed to find keychain binary");
        cmd.env("HOME", self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("KEYCHAIN_KEY");
        cmd.env_remove("KEYCHAIN_PUBLIC_KEY");
        cmd.env_remove("KEYCHAIN_PRIVATE_KEY");
        cmd.env_remove("KEYCHAIN_LOG");
        cmd.env("KEYCHAIN_CONFIG", self.path("config.toml"));
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Write `config.toml` in the test directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.path("config.toml"), contents).expect("failed to write config");
    }

    /// Shortcut for `keychain set <account> --namespace <ns> <value>`.
    pub fn cli_set(&self, account: &str, namespace: &str, value: &str) -> Output {
        self.cmd()
            .args(["set", account, "--namespace", namespace, value])
            .output()
            .expect("failed to run keychain set")
    }

    /// Shortcut for `keychain get <account>`.
    pub fn cli_get(&self, account: &str) -> Output {
        self.cmd()
            .args(["get", account])
            .output()
            .expect("failed to run keychain get")
    }
}

/// Captured stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Assert that the command exited successfully.
#[track_caller]
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

/// Assert that stdout contains `needle`.
#[track_caller]
pub fn assert_stdout_contains(output: &Output, needle: &str) {
    let out = stdout(output);
    assert!(out.contains(needle), "stdout missing {needle:?}\nstdout: {out}");
}
