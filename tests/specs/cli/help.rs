// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help, version and catalog output.

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("run")
        .stdout_has("templates")
        .stdout_has("check-config");
}

#[test]
fn run_help_lists_flags() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--no-bootstrap")
        .stdout_has("--no-telemetry");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn templates_lists_default_catalog() {
    cli()
        .args(&["templates"])
        .passes()
        .stdout_has("TEMPLATE")
        .stdout_has("DevOps Engineer")
        .stdout_has("Security Researcher")
        .stdout_has("Python Coder")
        .stdout_has("Data Analyst");
}

#[test]
fn no_args_with_empty_stdin_exits_zero() {
    cli().passes().stdout_lacks("fg> ");
}
