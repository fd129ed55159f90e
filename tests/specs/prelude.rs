// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared spec helpers.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

pub use similar_asserts::assert_eq;

/// Builder for one `fg` invocation.
pub struct Cli {
    cmd: Command,
    home: TempDir,
}

/// Start building an `fg` invocation with a clean environment.
pub fn cli() -> Cli {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("fg").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env("FG_STREAM_DELAY_MS", "0")
        .env("FG_TELEMETRY_INTERVAL_MS", "60000")
        .env_remove("FG_CONFIG")
        .env_remove("FG_COMMAND_TIMEOUT_MS")
        .env_remove("RUST_LOG")
        .env_remove("COLOR");
    Cli { cmd, home }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Console script fed to stdin.
    pub fn stdin(mut self, script: &str) -> Self {
        self.cmd.write_stdin(script.to_string());
        self
    }

    /// Write `toml` to a config file and pass it via `FG_CONFIG`.
    pub fn config(mut self, toml: &str) -> Self {
        let path = self.config_path();
        std::fs::write(&path, toml).unwrap();
        self.cmd.env("FG_CONFIG", &path);
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.path().join("fg.toml")
    }

    pub fn passes(mut self) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output::from(output.clone());
        assert!(output.status.success(), "expected success\n{}", out);
        out
    }

    pub fn fails(mut self) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output::from(output.clone());
        assert!(!output.status.success(), "expected failure\n{}", out);
        out
    }
}

pub struct Output {
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "--- stdout ---\n{}\n--- stderr ---\n{}", self.stdout, self.stderr)
    }
}

impl Output {
    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(self.stdout.contains(needle), "stdout lacks {:?}\n{}", needle, self);
        self
    }

    pub fn stdout_lacks(&self, needle: &str) -> &Self {
        assert!(!self.stdout.contains(needle), "stdout has {:?}\n{}", needle, self);
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(self.stderr.contains(needle), "stderr lacks {:?}\n{}", needle, self);
        self
    }

    /// Stdout lines containing `needle`.
    pub fn lines_with(&self, needle: &str) -> Vec<&str> {
        self.stdout.lines().filter(|l| l.contains(needle)).collect()
    }
}
