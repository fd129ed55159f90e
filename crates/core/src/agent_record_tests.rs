// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::agent::Priority;
use crate::transcript::EntrySource;

fn record() -> AgentRecord {
    AgentRecord::new(
        AgentId::from_string("agt-test"),
        "Main Console",
        "DevOps Engineer",
        AgentConfig { ram_limit_mb: 1024, priority: Priority::High },
        1_000,
    )
}

#[test]
fn new_record_is_idle_with_seed_entry() {
    let r = record();
    assert_eq!(r.status, AgentStatus::Idle);
    assert_eq!(r.pending_action(), None);
    assert_eq!(r.transcript.len(), 1);

    let seed = r.transcript.last().unwrap();
    assert_eq!(seed.source, EntrySource::SystemNote);
    assert!(seed.content.contains("DevOps Engineer"));
    assert!(seed.content.contains("1024MB"));
    assert!(seed.content.contains("priority: high"));
    assert!(seed.content.ends_with("Agent ready."));
}

#[test]
fn set_status_tracks_transition_time() {
    let mut r = record();
    r.set_status(AgentStatus::Running, 2_000);
    assert_eq!(r.status_changed_at_ms, 2_000);

    r.set_status(AgentStatus::Running, 3_000);
    assert_eq!(r.status_changed_at_ms, 2_000);
    assert_eq!(r.updated_at_ms, 3_000);
}

#[test]
fn pending_action_follows_status() {
    let mut r = record();
    r.set_status(AgentStatus::AwaitingApproval("rm -rf /data".into()), 2_000);
    assert_eq!(r.pending_action(), Some("rm -rf /data"));

    r.set_status(AgentStatus::Idle, 3_000);
    assert_eq!(r.pending_action(), None);
}

#[test]
fn push_chunk_coalesces() {
    let mut r = record();
    r.transcript.append(crate::TranscriptEntry::echo("ls", 1_500));
    r.push_chunk("total", 1_600);
    r.push_chunk(" 0", 1_700);
    assert_eq!(r.transcript.len(), 3);
    assert_eq!(r.transcript.last().unwrap().content, "total 0");
    assert_eq!(r.updated_at_ms, 1_700);
}

#[test]
fn uptime() {
    let r = record();
    assert_eq!(r.uptime_ms(61_000), 60_000);
    assert_eq!(r.uptime_ms(0), 0);
}

#[test]
fn record_serializes_status_and_pending_action() {
    let mut r = record();
    r.set_status(AgentStatus::AwaitingApproval("reboot".into()), 2_000);
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["status"]["status"], "AWAITING_APPROVAL");
    assert_eq!(json["status"]["pending_action"], "reboot");
}
