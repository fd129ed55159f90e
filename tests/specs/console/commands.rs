// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console commands driven through stdin.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn bootstrap_agents_are_listed() {
    let out = cli().stdin("ls\n").passes();
    out.stdout_has("Main Console").stdout_has("Sentinel One");
    assert_eq!(out.lines_with("IDLE").len(), 2);
}

#[test]
fn ls_filters_by_view() {
    cli()
        .stdin("ls security\n")
        .passes()
        .stdout_has("Sentinel One")
        .stdout_lacks("Main Console");
}

#[test]
fn no_bootstrap_starts_empty() {
    cli().args(&["run", "--no-bootstrap"]).stdin("ls\n").passes().stdout_has("No agents found");
}

#[test]
fn new_provisions_agent() {
    cli()
        .args(&["run", "--no-bootstrap", "--no-telemetry"])
        .stdin("new python coder Scratch Pad\nls\nevents\n")
        .passes()
        .stdout_has("Provisioned Scratch Pad (")
        .stdout_has("Provisioned new agent: Scratch Pad [Python Coder]");
}

#[test]
fn new_accepts_ram_and_priority() {
    cli()
        .args(&["run", "--no-bootstrap", "--no-telemetry"])
        .stdin("new DevOps Engineer Builder --ram 1024 --priority high\nshow Builder\n")
        .passes()
        .stdout_has("Provisioned Builder (")
        .stdout_has("Limits: 1024MB, high priority");
}

#[test]
fn new_rejects_bad_ram_option() {
    cli()
        .args(&["run", "--no-bootstrap", "--no-telemetry"])
        .stdin("new DevOps Engineer Builder --ram lots\nls\n")
        .passes()
        .stdout_has("error: invalid --ram value: lots")
        .stdout_has("No agents found");
}

#[test]
fn new_defaults_fit_a_raised_ram_floor() {
    cli()
        .config("[ram_limit_mb]\nmin = 1024\nmax = 4096\n")
        .args(&["run", "--no-telemetry"])
        .stdin("new DevOps Engineer Worker\nls\n")
        .passes()
        .stdout_has("Provisioned Worker (")
        .stdout_has("/1024MB");
}

#[test]
fn info_logs_stay_off_the_terminal() {
    let out = cli().stdin("send Main Console pwd\nwait\n").passes();
    out.stdout_has("[Main Console] done");
    assert!(!out.stderr.contains("INFO"), "{out}");
}

#[test]
fn send_and_export_transcript() {
    let out = cli()
        .stdin(
            "send Main Console pwd\nwait\n\
             send Main Console whoami\nwait\n\
             send Main Console history\nwait\n\
             export Main Console\n",
        )
        .passes();
    out.stdout_has("[Main Console] done")
        .stdout_has("OPERATOR-ECHO: > pwd")
        .stdout_has("/workspace")
        .stdout_has("   1  pwd")
        .stdout_has("   2  whoami")
        .stdout_has("   3  history");
}

#[test]
fn clear_and_reset() {
    cli()
        .stdin("send Sentinel One ls\nwait\nclear Sentinel One\nreset Sentinel One\nshow Sentinel One\n")
        .passes()
        .stdout_has("Cleared transcript of Sentinel One")
        .stdout_has("Reset session of Sentinel One")
        .stdout_has("logs cleared.")
        .stdout_has("Session reset.");
}

#[test]
fn bad_lines_report_errors_and_continue() {
    cli()
        .stdin("launch\nsend nobody ls\nls\n")
        .passes()
        .stdout_has("error: unknown command: launch")
        .stdout_has("error: no agent matches \"nobody ls\"")
        .stdout_has("Main Console");
}

#[test]
fn quit_ignores_remaining_lines() {
    cli()
        .args(&["run", "--no-bootstrap"])
        .stdin("quit\nnew python coder late\n")
        .passes()
        .stdout_lacks("Provisioned late");
}

#[test]
fn stats_show_fleet_counts() {
    cli()
        .args(&["run", "--no-telemetry"])
        .stdin("stats\n")
        .passes()
        .stdout_has("Agents: 2 total, 2 idle");
}
