// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fg_adapters::ExecutorError;
use fg_core::test_support::idle_record;
use fg_core::{AgentStatus, Decision, Severity, Verdict};
use std::time::Duration;

fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
    std::env::set_var("NO_COLOR", "1");
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn agent_table_shows_short_id_and_status_label() {
    let mut gated = idle_record("agt-abcdefghijkl", "Main Console", "DevOps Engineer");
    gated.set_status(AgentStatus::AwaitingApproval("rm -rf /".into()), 1_000_100);
    let idle = idle_record("agt-zyxwvutsrqpo", "Sentinel One", "Security Researcher");

    let text = render(|out| write_agents(out, &[gated, idle]));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID"));
    assert!(lines[1].starts_with("abcdefgh  Main Console"));
    assert!(lines[1].contains("WAITING"));
    assert!(lines[1].ends_with("rm -rf /"));
    assert!(lines[2].contains("IDLE"));
    assert!(lines[2].contains("128/512MB"));
}

#[test]
fn empty_agent_list() {
    assert_eq!(render(|out| write_agents(out, &[])), "No agents found\n");
}

#[test]
fn agent_detail_lists_transcript_and_decisions() {
    let mut record = idle_record("agt-abcdefghijkl", "A", "Python Coder");
    record.push_chunk("line one\nline two\n", 1_000_500);
    record.note(Severity::Warning, "Permission Denied by Admin.", 1_000_600);
    record.decisions.push(Decision {
        action: "sudo ls".into(),
        verdict: Verdict::Denied,
        requested_at_ms: 1_000_000,
        decided_at_ms: 1_003_000,
    });

    let text = render(|out| write_agent(out, &record, 1_061_000));

    assert!(text.contains("Agent: A (agt-abcdefghijkl)"));
    assert!(text.contains("Status: IDLE"));
    assert!(text.contains("Uptime: 1m 1s"));
    assert!(text.contains("denied   sudo ls (held 3s)"));
    assert!(text.contains("Initializing sandbox workspace for Python Coder..."));
    assert!(text.contains("  line one\n"));
    assert!(text.contains("\n          line two\n"));
    assert!(text.contains("Permission Denied by Admin."));
}

#[test]
fn events_render_clock_category_message() {
    let mut log = fg_core::EventLog::new(5);
    log.push(fg_core::EventCategory::Security, "Token refresh successful", 1_700_000_000_000);

    let text = render(|out| write_events(out, &log.recent(5)));

    assert_eq!(text, "22:13:20  security  Token refresh successful\n");
}

#[test]
fn stats_without_metrics_prints_counts_only() {
    let summary = FleetSummary { total: 3, idle: 2, awaiting_approval: 1, ..Default::default() };
    let text = render(|out| write_stats(out, &summary, None));
    assert_eq!(text, "Agents: 3 total, 2 idle, 0 active, 1 waiting, 0 error, 0 offline\n");
}

#[test]
fn stats_with_metrics_shows_latest_cpu() {
    let mut metrics = SystemMetrics::default();
    metrics.cpu_history.push_back(fg_engine::CpuSample { timestamp_ms: 0, percent: 37 });
    let text = render(|out| write_stats(out, &FleetSummary::default(), Some(&metrics)));
    assert!(text.contains("CPU: 37% (1 samples)"));
    assert!(text.contains("up 12kb/s, down 45kb/s, latency 24ms"));
}

#[test]
fn outcome_notices() {
    std::env::set_var("NO_COLOR", "1");
    assert_eq!(describe_outcome("A", &SessionOutcome::Completed), "[A] done");
    assert_eq!(
        describe_outcome("A", &SessionOutcome::AwaitingApproval("sudo ls".into())),
        "[A] approval required: sudo ls"
    );
    assert!(describe_outcome("A", &SessionOutcome::Failed(ExecutorError::StreamClosed))
        .starts_with("[A] failed:"));
    assert_eq!(
        describe_outcome("A", &SessionOutcome::TimedOut(Duration::from_millis(1500))),
        "[A] timed out after 1s"
    );
}
