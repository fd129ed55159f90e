// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clear, export and reset tests

use super::*;
use crate::runtime::housekeeping::RESET_NOTE;
use fg_adapters::ExecutorError;
use fg_core::CLEARED_NOTE;
use std::sync::Arc;
use tokio::sync::Notify;

#[tokio::test]
async fn clear_reseeds_transcript_and_keeps_status() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script("ping", Script::fail(ExecutorError::Connection("x".into())));
    ctx.runtime.submit(&id, "ping").await.unwrap();

    ctx.runtime.clear(&id).unwrap();

    assert_eq!(ctx.contents(&id), vec![CLEARED_NOTE]);
    assert_eq!(ctx.status(&id), AgentStatus::Error);
}

#[tokio::test]
async fn clear_while_gated_keeps_pending_action() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "rm -rf /").await;

    ctx.runtime.clear(&id).unwrap();

    assert_eq!(ctx.record(&id).pending_action(), Some("rm -rf /"));
    assert_eq!(ctx.entries(&id).len(), 1);
}

#[tokio::test]
async fn export_renders_one_line_per_entry() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script("ls", Script::output(&["total 0"]));
    ctx.runtime.clear(&id).unwrap();
    ctx.runtime.submit(&id, "ls").await.unwrap();

    let text = ctx.runtime.export(&id).unwrap();

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("SYSTEM-NOTE: logs cleared."));
    assert!(lines[1].ends_with("OPERATOR-ECHO: > ls"));
    assert!(lines[2].ends_with("AGENT-OUTPUT: total 0"));
    assert!(lines[0].starts_with("[2023-11-14T22:13:20.000Z]"));
}

#[tokio::test]
async fn reset_discards_executor_session_and_recovers_error() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script("ping", Script::fail(ExecutorError::Connection("x".into())));
    ctx.runtime.submit(&id, "ping").await.unwrap();

    ctx.runtime.reset(&id).await.unwrap();

    assert_eq!(ctx.executor.resets(), vec![id.clone()]);
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
    assert_eq!(ctx.contents(&id).last().unwrap(), RESET_NOTE);
    assert_eq!(ctx.event_messages().last().unwrap(), "Reset session for agent: A");
}

#[tokio::test]
async fn reset_is_refused_at_the_gate() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.gate(&id, "sudo rm").await;

    let rejection = ctx.runtime.reset(&id).await.unwrap_err();

    assert_eq!(
        rejection,
        Rejection::Busy { id: id.clone(), status: AgentStatusKind::AwaitingApproval }
    );
    assert!(ctx.executor.resets().is_empty());
    assert_eq!(ctx.record(&id).pending_action(), Some("sudo rm"));
}

#[tokio::test]
async fn reset_is_refused_if_a_command_starts_meanwhile() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    let release = Arc::new(Notify::new());
    ctx.executor.hold_next_reset(Arc::clone(&release));

    let runtime = ctx.runtime.clone();
    let reset_id = id.clone();
    let reset = tokio::spawn(async move { runtime.reset(&reset_id).await });
    while ctx.executor.resets().is_empty() {
        tokio::task::yield_now().await;
    }
    let session = ctx.runtime.begin(&id, "build").unwrap();
    release.notify_one();

    let rejection = reset.await.unwrap().unwrap_err();
    assert_eq!(rejection, Rejection::Busy { id: id.clone(), status: AgentStatusKind::Running });
    assert_eq!(ctx.status(&id), AgentStatus::Running);
    assert!(!ctx.contents(&id).contains(&RESET_NOTE.to_string()));
    assert!(ctx.event_messages().iter().all(|m| !m.starts_with("Reset session")));

    assert_eq!(session.run().await, SessionOutcome::Completed);
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
}

#[tokio::test]
async fn unknown_agent_housekeeping_is_rejected() {
    let ctx = setup();
    let ghost = AgentId::from_string("agt-ghost");

    assert_eq!(ctx.runtime.clear(&ghost), Err(Rejection::UnknownAgent(ghost.clone())));
    assert!(ctx.runtime.export(&ghost).is_err());
    assert!(ctx.runtime.reset(&ghost).await.is_err());
    assert!(ctx.executor.resets().is_empty());
}
