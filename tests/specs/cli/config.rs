// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config resolution and validation.

use crate::prelude::*;

#[test]
fn check_config_prints_defaults() {
    cli()
        .args(&["check-config"])
        .passes()
        .stderr_has("built-in defaults")
        .stdout_has("\"telemetry_interval_ms\": 60000")
        .stdout_has("\"event_retention\": 50")
        .stdout_has("\"Main Console\"");
}

#[test]
fn check_config_reads_file_and_env() {
    let out = cli()
        .config(
            r#"
            event_retention = 10

            [[templates]]
            name = "Rust Auditor"
            description = "Reads crates."

            [[bootstrap]]
            name = "auditor"
            template = "Rust Auditor"
            "#,
        )
        .env("FG_COMMAND_TIMEOUT_MS", "2500")
        .args(&["check-config"])
        .passes()
        .stderr_has("fg.toml")
        .stdout_has("\"event_retention\": 10")
        .stdout_has("\"command_timeout_ms\": 2500")
        .stdout_has("Rust Auditor")
        .stdout
        .clone();
    assert!(!out.contains("Data Analyst"));
}

#[test]
fn invalid_config_fails() {
    cli()
        .config("[ram_limit_mb]\nmin = 900\nmax = 100\n")
        .args(&["check-config"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn unknown_key_fails_with_path() {
    cli()
        .config("telemetry = 5\n")
        .args(&["templates"])
        .fails()
        .stderr_has("failed to parse")
        .stderr_has("fg.toml");
}

#[test]
fn missing_explicit_config_fails() {
    cli()
        .args(&["--config", "/nonexistent/fg.toml", "templates"])
        .fails()
        .stderr_has("failed to read");
}

#[test]
fn bootstrap_from_config_is_provisioned() {
    cli()
        .config(
            r#"
            [[bootstrap]]
            name = "solo"
            template = "Python Coder"
            ram_limit_mb = 256
            "#,
        )
        .stdin("ls\n")
        .passes()
        .stdout_has("solo")
        .stdout_has("/256MB")
        .stdout_lacks("Main Console");
}
