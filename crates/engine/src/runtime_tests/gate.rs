// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval gate tests

use super::*;
use crate::runtime::gate::{APPROVED_NOTE, DENIED_NOTE};
use fg_adapters::ExecutorError;
use fg_core::{APPROVED, DENIED};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

#[tokio::test]
async fn approve_resumes_with_approved_and_returns_idle() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "rm -rf /").await;
    assert_eq!(ctx.record(&id).pending_action(), Some("rm -rf /"));
    ctx.executor.script(APPROVED, Script::output(&["Removing...", " done\n"]));

    let outcome = ctx.runtime.approve(&id).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(ctx.executor.commands(), vec!["rm -rf /", APPROVED]);
    let record = ctx.record(&id);
    assert_eq!(record.status, AgentStatus::Idle);
    assert_eq!(record.pending_action(), None);

    let entries = ctx.entries(&id);
    let n = entries.len();
    assert_eq!(entries[n - 2].content, APPROVED_NOTE);
    assert_eq!(entries[n - 2].severity, Severity::Success);
    assert_eq!(entries[n - 1].content, "Removing... done\n");
    assert!(entries.iter().all(|e| e.content != "> APPROVED"));
}

#[tokio::test]
async fn approve_marks_agent_running_while_resuming() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "sudo reboot").await;
    let release = Arc::new(Notify::new());
    ctx.executor.script(APPROVED, Script::held(&["rebooting"], Arc::clone(&release)));

    let session = ctx.runtime.decide(&id, Verdict::Approved).unwrap();
    assert_eq!(ctx.status(&id), AgentStatus::Running);
    let task = tokio::spawn(session.run());

    release.notify_one();
    assert_eq!(task.await.unwrap(), SessionOutcome::Completed);
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
}

#[tokio::test]
async fn deny_resets_cleanly() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "rm -rf /data").await;
    let before = ctx.entries(&id).len();
    ctx.executor.script(DENIED, Script::output(&["Permission denied.\n"]));

    let outcome = ctx.runtime.deny(&id).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Completed);
    let record = ctx.record(&id);
    assert_eq!(record.status, AgentStatus::Idle);
    assert_eq!(record.pending_action(), None);

    let entries = ctx.entries(&id);
    assert_eq!(entries[before].content, DENIED_NOTE);
    assert_eq!(entries[before].severity, Severity::Warning);
    assert_eq!(entries[before].source, EntrySource::SystemNote);
    assert_eq!(entries[before + 1].content, "Permission denied.\n");
    assert_eq!(ctx.executor.commands().last().unwrap(), DENIED);
}

#[tokio::test]
async fn deny_is_idle_before_acknowledgment_streams() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "kill 1").await;

    let session = ctx.runtime.decide(&id, Verdict::Denied).unwrap();

    assert_eq!(ctx.status(&id), AgentStatus::Idle);
    assert_eq!(ctx.contents(&id).last().unwrap(), DENIED_NOTE);
    session.run().await;
}

#[tokio::test]
async fn new_work_waits_for_denial_acknowledgment() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "kill 1").await;
    let release = Arc::new(Notify::new());
    ctx.executor.script(DENIED, Script::held(&["Aborted.\n"], Arc::clone(&release)));

    let task = tokio::spawn(ctx.runtime.decide(&id, Verdict::Denied).unwrap().run());
    while ctx.contents(&id).last().map(String::as_str) != Some("Aborted.\n") {
        tokio::task::yield_now().await;
    }

    assert_eq!(ctx.status(&id), AgentStatus::Idle);
    let acknowledging = Rejection::Acknowledging(id.clone());
    assert_eq!(ctx.runtime.submit(&id, "ls").await.unwrap_err(), acknowledging);
    assert_eq!(ctx.runtime.reset(&id).await.unwrap_err(), acknowledging);
    assert!(!ctx.contents(&id).contains(&"> ls".to_string()));
    assert!(ctx.executor.resets().is_empty());

    release.notify_one();
    assert_eq!(task.await.unwrap(), SessionOutcome::Completed);
    assert_eq!(ctx.runtime.submit(&id, "ls").await.unwrap(), SessionOutcome::Completed);
    assert_eq!(ctx.executor.commands(), vec!["kill 1", DENIED, "ls"]);
}

#[tokio::test]
async fn gated_agent_rejects_submissions_others_unaffected() {
    let ctx = setup();
    let gated = ctx.provision("A", "DevOps Engineer");
    let other = ctx.provision("B", "Data Analyst");
    ctx.gate(&gated, "rm -rf /").await;
    let before = ctx.entries(&gated);

    for text in ["ls", "APPROVED", "rm -rf /"] {
        let rejection = ctx.runtime.submit(&gated, text).await.unwrap_err();
        assert_eq!(
            rejection,
            Rejection::Busy { id: gated.clone(), status: AgentStatusKind::AwaitingApproval }
        );
    }
    assert_eq!(ctx.status(&gated), AgentStatus::AwaitingApproval("rm -rf /".into()));
    assert_eq!(ctx.entries(&gated), before);

    assert_eq!(ctx.runtime.submit(&other, "ls").await.unwrap(), SessionOutcome::Completed);
}

#[tokio::test]
async fn double_approve_is_a_single_approval() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "rm -rf /").await;

    ctx.runtime.approve(&id).await.unwrap();
    let second = ctx.runtime.approve(&id).await.unwrap_err();

    assert_eq!(second, Rejection::NoPendingAction(id.clone()));
    let approvals = ctx.executor.commands().into_iter().filter(|c| c == APPROVED).count();
    assert_eq!(approvals, 1);
    assert_eq!(ctx.record(&id).decisions.len(), 1);
}

#[tokio::test]
async fn double_deny_is_a_single_denial() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "shutdown -h now").await;

    ctx.runtime.deny(&id).await.unwrap();
    assert!(ctx.runtime.deny(&id).await.is_err());

    let notes = ctx.contents(&id).into_iter().filter(|c| c == DENIED_NOTE).count();
    assert_eq!(notes, 1);
}

#[tokio::test]
async fn decisions_without_pending_action_are_rejected() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    let ghost = AgentId::from_string("agt-ghost");

    assert_eq!(ctx.runtime.approve(&id).await.unwrap_err(), Rejection::NoPendingAction(id.clone()));
    assert_eq!(ctx.runtime.deny(&id).await.unwrap_err(), Rejection::NoPendingAction(id.clone()));
    assert_eq!(ctx.runtime.approve(&ghost).await.unwrap_err(), Rejection::UnknownAgent(ghost));
    assert_eq!(ctx.entries(&id).len(), 1);
    assert!(ctx.executor.calls().is_empty());
}

#[tokio::test]
async fn approved_resume_failure_sets_error() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "mkfs /dev/sdb").await;
    ctx.executor.script(APPROVED, Script::fail(ExecutorError::Connection("lost".into())));

    let outcome = ctx.runtime.approve(&id).await.unwrap();

    assert!(matches!(outcome, SessionOutcome::Failed(_)));
    assert_eq!(ctx.status(&id), AgentStatus::Error);
}

#[tokio::test]
async fn denied_acknowledgment_failure_stays_idle() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "dd if=/dev/zero").await;
    ctx.executor.script(DENIED, Script::fail(ExecutorError::Connection("lost".into())));

    let outcome = ctx.runtime.deny(&id).await.unwrap();

    assert!(matches!(outcome, SessionOutcome::Failed(_)));
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
}

#[tokio::test]
async fn nested_approval_request_after_approve_is_ignored() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "sudo su").await;
    ctx.executor.script(APPROVED, Script::output(&["[[APPROVAL_REQUIRED: chmod 777 /]]"]));

    let outcome = ctx.runtime.approve(&id).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
}

#[tokio::test]
async fn decisions_are_recorded_and_announced() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "rm -rf /").await;
    ctx.clock.advance(Duration::from_secs(30));

    ctx.runtime.approve(&id).await.unwrap();

    let decision = ctx.record(&id).decisions.pop().unwrap();
    assert_eq!(decision.action, "rm -rf /");
    assert_eq!(decision.verdict, Verdict::Approved);
    assert_eq!(decision.wait_ms(), 30_000);

    let events = ctx.runtime.recent_events(10);
    let last = events.last().unwrap();
    assert_eq!(last.category, EventCategory::Security);
    assert_eq!(last.message, "Admin APPROVED action for A");

    ctx.gate(&id, "ip link down").await;
    ctx.runtime.deny(&id).await.unwrap();
    assert_eq!(ctx.event_messages().last().unwrap(), "Admin DENIED action for A");
}
