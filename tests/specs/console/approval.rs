// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval gate round trips against the simulated executor.

use crate::prelude::*;

#[test]
fn dangerous_command_waits_then_approve_executes() {
    cli()
        .stdin(
            "send Main Console sudo apt update\nwait\nls\n\
             approve Main Console\nwait\nshow Main Console\n",
        )
        .passes()
        .stdout_has("[Main Console] approval required: sudo apt update")
        .stdout_has("WAITING")
        .stdout_has("[Main Console] approved")
        .stdout_has("Action approved by Admin.")
        .stdout_has("Permission granted.")
        .stdout_has("[ok] sudo apt update completed.")
        .stdout_has("approved sudo apt update");
}

#[test]
fn deny_aborts_the_action() {
    cli()
        .stdin("send Sentinel One rm -rf /var/log\nwait\ndeny Sentinel One\nwait\nexport Sentinel One\n")
        .passes()
        .stdout_has("[Sentinel One] denied")
        .stdout_has("Permission Denied by Admin.")
        .stdout_has("Aborted: rm -rf /var/log");
}

#[test]
fn gated_agent_refuses_new_commands() {
    cli()
        .stdin("send Main Console shutdown now\nwait\nsend Main Console ls\napprove Sentinel One\n")
        .passes()
        .stdout_has("is AWAITING_APPROVAL")
        .stdout_has("has no pending action");
}

#[test]
fn decisions_are_announced_as_security_events() {
    cli()
        .args(&["run", "--no-telemetry"])
        .stdin("send Main Console kill 1\nwait\ndeny Main Console\nwait\nevents\n")
        .passes()
        .stdout_has("Agent Main Console requested elevated permission: kill 1")
        .stdout_has("Admin DENIED action for Main Console");
}
