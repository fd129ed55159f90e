// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use tokio::sync::Notify;
use yare::parameterized;

fn request(command: &str) -> CommandRequest {
    CommandRequest::new(AgentId::from_string("agt-test"), "DevOps Engineer", command)
}

async fn drain(mut rx: mpsc::Receiver<StreamChunk>) -> Vec<StreamChunk> {
    let mut out = Vec::new();
    while let Some(chunk) = rx.recv().await {
        out.push(chunk);
    }
    out
}

#[parameterized(
    empty = { "", 4, &[] },
    exact = { "abcd", 4, &["abcd"] },
    remainder = { "abcdef", 4, &["abcd", "ef"] },
    multibyte = { "héllo✓", 2, &["hé", "ll", "o✓"] },
    zero_is_one = { "ab", 0, &["a", "b"] },
)]
fn fragments_split_on_chars(text: &str, max: usize, expected: &[&str]) {
    assert_eq!(fragments(text, max), expected);
}

#[tokio::test]
async fn emit_reports_closed_stream() {
    let (tx, rx) = mpsc::channel(1);
    drop(rx);
    let err = emit(&tx, StreamChunk::output("x")).await.unwrap_err();
    assert_eq!(err, ExecutorError::StreamClosed);
}

#[tokio::test]
async fn fake_streams_scripted_chunks_in_order() {
    let fake = FakeExecutor::new();
    fake.script("list files", Script::output(&["total ", "0\n"]));

    let (tx, rx) = mpsc::channel(8);
    let result = fake.send_command(request("list files"), tx).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(drain(rx).await, vec![StreamChunk::output("total "), StreamChunk::output("0\n")]);
    assert_eq!(fake.commands(), vec!["list files"]);
}

#[tokio::test]
async fn fake_extracts_marker_spanning_chunks() {
    let fake = FakeExecutor::new();
    fake.script("rm -rf /", Script::output(&["Checking\n[[APPROVAL_RE", "QUIRED: rm -rf /]]"]));

    let (tx, _rx) = mpsc::channel(8);
    let result = fake.send_command(request("rm -rf /"), tx).await.unwrap();

    assert_eq!(result.as_deref(), Some("rm -rf /"));
}

#[tokio::test]
async fn fake_explicit_approval_wins() {
    let fake = FakeExecutor::new();
    fake.script("go", Script::output(&["ok"]).with_approval("wipe disk"));

    let (tx, _rx) = mpsc::channel(8);
    let result = fake.send_command(request("go"), tx).await.unwrap();

    assert_eq!(result.as_deref(), Some("wipe disk"));
}

#[tokio::test]
async fn fake_fail_streams_then_errors() {
    let fake = FakeExecutor::new();
    fake.script(
        "deploy",
        Script::Fail {
            chunks: vec![StreamChunk::output("starting")],
            error: ExecutorError::Connection("reset by peer".into()),
        },
    );

    let (tx, rx) = mpsc::channel(8);
    let err = fake.send_command(request("deploy"), tx).await.unwrap_err();

    assert_eq!(err, ExecutorError::Connection("reset by peer".into()));
    assert_eq!(drain(rx).await, vec![StreamChunk::output("starting")]);
}

#[tokio::test]
async fn fake_queues_are_consumed_then_default_applies() {
    let fake = FakeExecutor::new();
    fake.script("x", Script::output(&["first"]));
    fake.set_default(Script::output(&["fallback"]));

    let (tx, rx) = mpsc::channel(8);
    fake.send_command(request("x"), tx.clone()).await.unwrap();
    fake.send_command(request("x"), tx).await.unwrap();

    assert_eq!(
        drain(rx).await,
        vec![StreamChunk::output("first"), StreamChunk::output("fallback")]
    );
}

#[tokio::test]
async fn fake_held_waits_for_release() {
    let fake = FakeExecutor::new();
    let release = Arc::new(Notify::new());
    fake.script("build", Script::held(&["compiling"], Arc::clone(&release)));

    let (tx, mut rx) = mpsc::channel(8);
    let task = tokio::spawn({
        let fake = fake.clone();
        async move { fake.send_command(request("build"), tx).await }
    });

    assert_eq!(rx.recv().await, Some(StreamChunk::output("compiling")));
    assert!(!task.is_finished());

    release.notify_one();
    assert_eq!(task.await.unwrap().unwrap(), None);
}

#[tokio::test]
async fn fake_records_resets() {
    let fake = FakeExecutor::new();
    let id = AgentId::from_string("agt-r");
    fake.reset(&id).await;
    assert_eq!(fake.resets(), vec![id]);
}
