// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    idle     = { AgentStatus::Idle, None },
    running  = { AgentStatus::Running, None },
    awaiting = { AgentStatus::AwaitingApproval("rm -rf /data".into()), Some("rm -rf /data") },
    error    = { AgentStatus::Error, None },
    offline  = { AgentStatus::Offline, None },
)]
fn pending_action_only_while_awaiting(status: AgentStatus, expected: Option<&str>) {
    assert_eq!(status.pending_action(), expected);
}

#[yare::parameterized(
    idle     = { AgentStatus::Idle, true },
    error    = { AgentStatus::Error, true },
    running  = { AgentStatus::Running, false },
    awaiting = { AgentStatus::AwaitingApproval("x".into()), false },
    offline  = { AgentStatus::Offline, false },
)]
fn command_admission(status: AgentStatus, accepts: bool) {
    assert_eq!(status.accepts_commands(), accepts);
}

#[test]
fn status_serializes_with_pending_action() {
    let json = serde_json::to_value(AgentStatus::AwaitingApproval("reboot".into())).unwrap();
    assert_eq!(json["status"], "AWAITING_APPROVAL");
    assert_eq!(json["pending_action"], "reboot");

    let idle = serde_json::to_value(AgentStatus::Idle).unwrap();
    assert_eq!(idle["status"], "IDLE");
    assert!(idle.get("pending_action").is_none());
}

#[test]
fn status_display() {
    assert_eq!(AgentStatus::Idle.to_string(), "idle");
    assert_eq!(AgentStatus::Running.to_string(), "running");
    assert_eq!(
        AgentStatus::AwaitingApproval("sudo reboot".into()).to_string(),
        "awaiting approval: sudo reboot"
    );
}

#[test]
fn kind_labels_match_terminal_header() {
    assert_eq!(AgentStatusKind::Running.label(), "ACTIVE");
    assert_eq!(AgentStatusKind::AwaitingApproval.label(), "WAITING");
    assert_eq!(AgentStatus::Error.kind(), AgentStatusKind::Error);
}

#[yare::parameterized(
    low    = { "low", Priority::Low },
    normal = { "Normal", Priority::Normal },
    high   = { "HIGH", Priority::High },
)]
fn priority_parses_case_insensitively(input: &str, expected: Priority) {
    assert_eq!(input.parse::<Priority>().unwrap(), expected);
}

#[test]
fn priority_rejects_unknown() {
    assert!("urgent".parse::<Priority>().is_err());
}

#[test]
fn agent_config_defaults() {
    let config = AgentConfig::default();
    assert_eq!(config.ram_limit_mb, 512);
    assert_eq!(config.priority, Priority::Normal);
}
