// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command session tests

use super::*;
use fg_adapters::ExecutorError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

#[tokio::test]
async fn list_files_completes_idle_with_echo_and_output() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script("list files", Script::output(&["total 0\n"]));

    let outcome = ctx.runtime.submit(&id, "list files").await.unwrap();

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
    let entries = ctx.entries(&id);
    // seed, echo, output
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].source, EntrySource::OperatorEcho);
    assert_eq!(entries[1].content, "> list files");
    assert_eq!(entries[2].source, EntrySource::AgentOutput);
    assert_eq!(entries[2].content, "total 0\n");
}

#[tokio::test]
async fn begin_applies_optimistic_phase_before_streaming() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");

    let session = ctx.runtime.begin(&id, "build").unwrap();

    assert_eq!(session.command(), "build");
    assert_eq!(ctx.status(&id), AgentStatus::Running);
    assert_eq!(ctx.contents(&id).last().unwrap(), "> build");
    assert!(ctx.executor.calls().is_empty());

    session.run().await;
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
}

#[tokio::test]
async fn streamed_chunks_coalesce_into_one_entry() {
    let ctx = setup();
    let id = ctx.provision("A", "Python Coder");
    ctx.executor.script("make", Script::output(&["Com", "piling", "...", " done"]));

    ctx.runtime.submit(&id, "make").await.unwrap();

    let contents = ctx.contents(&id);
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[2], "Compiling... done");
}

#[tokio::test]
async fn marker_in_full_text_gates_the_agent() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script(
        "clean",
        Script::output(&["Step 1\n", "[[APPROVAL_REQUIRED: delete /tmp/cache]]"]),
    );

    let outcome = ctx.runtime.submit(&id, "clean").await.unwrap();

    assert_eq!(outcome, SessionOutcome::AwaitingApproval("delete /tmp/cache".into()));
    let record = ctx.record(&id);
    assert_eq!(record.pending_action(), Some("delete /tmp/cache"));
    assert_eq!(
        ctx.event_messages().last().unwrap(),
        "Agent A requested elevated permission: delete /tmp/cache"
    );
}

#[tokio::test]
async fn marker_split_across_chunks_is_found() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script(
        "wipe",
        Script::chunks(vec![
            StreamChunk::output("[[APPROVAL_"),
            StreamChunk::output("REQUIRED: wipe di"),
            StreamChunk::output("sk]]"),
        ])
        .with_approval("ignored when the scan succeeds"),
    );

    let outcome = ctx.runtime.submit(&id, "wipe").await.unwrap();

    assert_eq!(outcome, SessionOutcome::AwaitingApproval("wipe disk".into()));
}

#[tokio::test]
async fn executor_description_used_when_text_has_no_marker() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script("deploy", Script::output(&["needs sign-off"]).with_approval("deploy prod"));

    let outcome = ctx.runtime.submit(&id, "deploy").await.unwrap();

    assert_eq!(outcome, SessionOutcome::AwaitingApproval("deploy prod".into()));
}

#[tokio::test]
async fn executor_failure_sets_error_and_keeps_echo() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script("ping", Script::fail(ExecutorError::Connection("refused".into())));

    let outcome = ctx.runtime.submit(&id, "ping").await.unwrap();

    assert_eq!(outcome, SessionOutcome::Failed(ExecutorError::Connection("refused".into())));
    assert_eq!(ctx.status(&id), AgentStatus::Error);
    let contents = ctx.contents(&id);
    assert_eq!(contents.len(), 2);
    assert_eq!(contents[1], "> ping");
}

#[tokio::test]
async fn error_status_accepts_a_new_command() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script("ping", Script::fail(ExecutorError::Rejected("quota".into())));
    ctx.runtime.submit(&id, "ping").await.unwrap();
    assert_eq!(ctx.status(&id), AgentStatus::Error);

    let outcome = ctx.runtime.submit(&id, "ping").await.unwrap();

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
}

#[tokio::test]
async fn in_band_error_appends_note_and_forces_error() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script(
        "sync",
        Script::chunks(vec![
            StreamChunk::output("syncing"),
            StreamChunk::error("[SYSTEM ERROR]: Connection to agent process failed."),
        ]),
    );

    let outcome = ctx.runtime.submit(&id, "sync").await.unwrap();

    assert!(matches!(outcome, SessionOutcome::StreamError(_)));
    assert_eq!(ctx.status(&id), AgentStatus::Error);
    let last = ctx.entries(&id).pop().unwrap();
    assert_eq!(last.source, EntrySource::SystemNote);
    assert_eq!(last.severity, Severity::Error);
    assert_eq!(last.content, "[SYSTEM ERROR]: Connection to agent process failed.");
}

#[tokio::test]
async fn running_agent_rejects_second_submission() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    let release = Arc::new(Notify::new());
    ctx.executor.script("long", Script::held(&["working"], Arc::clone(&release)));

    let session = ctx.runtime.begin(&id, "long").unwrap();
    let task = tokio::spawn(session.run());
    tokio::task::yield_now().await;

    let rejection = ctx.runtime.submit(&id, "other").await.unwrap_err();
    assert_eq!(rejection, Rejection::Busy { id: id.clone(), status: AgentStatusKind::Running });
    assert!(!ctx.contents(&id).contains(&"> other".to_string()));

    release.notify_one();
    assert_eq!(task.await.unwrap(), SessionOutcome::Completed);
    assert_eq!(ctx.executor.commands(), vec!["long"]);
}

#[tokio::test(start_paused = true)]
async fn hung_executor_times_out_into_error() {
    let ctx = setup_with(RuntimeConfig::default().command_timeout(Duration::from_millis(500)));
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.executor.script("hang", Script::Hang);

    let outcome = ctx.runtime.submit(&id, "hang").await.unwrap();

    assert_eq!(outcome, SessionOutcome::TimedOut(Duration::from_millis(500)));
    assert_eq!(ctx.status(&id), AgentStatus::Error);
    assert_eq!(ctx.contents(&id).last().unwrap(), "Command timed out after 500ms.");
}

#[tokio::test]
async fn unknown_agent_and_empty_command_are_rejected() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    let ghost = AgentId::from_string("agt-ghost");

    assert_eq!(
        ctx.runtime.submit(&ghost, "ls").await.unwrap_err(),
        Rejection::UnknownAgent(ghost.clone())
    );
    assert_eq!(ctx.runtime.submit(&id, "   ").await.unwrap_err(), Rejection::EmptyCommand);
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
    assert_eq!(ctx.entries(&id).len(), 1);
    assert!(ctx.executor.calls().is_empty());
}

#[tokio::test]
async fn executor_receives_agent_template() {
    let ctx = setup();
    let id = ctx.provision("A", "Security Researcher");

    ctx.runtime.submit(&id, "scan").await.unwrap();

    let call = ctx.executor.calls().pop().unwrap();
    assert_eq!(call.agent_id, id);
    assert_eq!(call.template, "Security Researcher");
    assert_eq!(call.command, "scan");
}

#[tokio::test]
async fn concurrent_sessions_keep_transcripts_separate() {
    let ctx = setup();
    let a = ctx.provision("A", "DevOps Engineer");
    let b = ctx.provision("B", "Data Analyst");
    ctx.executor.script("alpha", Script::output(&["a1", "a2", "a3"]));
    ctx.executor.script("beta", Script::output(&["b1", "b2"]));

    let (ra, rb) = tokio::join!(ctx.runtime.submit(&a, "alpha"), ctx.runtime.submit(&b, "beta"));

    assert_eq!(ra.unwrap(), SessionOutcome::Completed);
    assert_eq!(rb.unwrap(), SessionOutcome::Completed);
    assert_eq!(ctx.contents(&a)[2], "a1a2a3");
    assert_eq!(ctx.contents(&b)[2], "b1b2");
}

#[tokio::test]
async fn clear_during_session_keeps_it_running() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    let release = Arc::new(Notify::new());
    ctx.executor.script("tail", Script::held(&["line 1\n"], Arc::clone(&release)));

    let task = tokio::spawn(ctx.runtime.begin(&id, "tail").unwrap().run());
    while ctx.contents(&id).last().map(String::as_str) != Some("line 1\n") {
        tokio::task::yield_now().await;
    }
    ctx.runtime.clear(&id).unwrap();

    assert_eq!(ctx.contents(&id), vec![fg_core::CLEARED_NOTE.to_string()]);
    assert_eq!(ctx.status(&id), AgentStatus::Running);

    release.notify_one();
    assert_eq!(task.await.unwrap(), SessionOutcome::Completed);
    assert_eq!(ctx.status(&id), AgentStatus::Idle);
}

#[tokio::test]
async fn timestamps_come_from_the_clock() {
    let ctx = setup();
    let id = ctx.provision("A", "DevOps Engineer");
    ctx.clock.advance(Duration::from_secs(5));

    ctx.runtime.submit(&id, "ls").await.unwrap();

    let record = ctx.record(&id);
    assert_eq!(record.created_at_ms, 1_700_000_000_000);
    assert_eq!(record.transcript.last().unwrap().timestamp_ms, 1_700_000_005_000);
    assert_eq!(record.status_changed_at_ms, 1_700_000_005_000);
}
