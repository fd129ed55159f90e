// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted executor for tests.

use super::{emit, ChunkSender, CommandExecutor, CommandRequest, ExecutorError, StreamChunk};
use async_trait::async_trait;
use fg_core::{extract_approval, AgentId};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Notify;

/// How the fake answers one command.
#[derive(Debug, Clone)]
pub enum Script {
    /// Stream the chunks, then resolve.
    ///
    /// Without an explicit `approval`, the result is extracted from the
    /// concatenated output the way a real executor would.
    Stream { chunks: Vec<StreamChunk>, approval: Option<String> },
    /// Stream the chunks, then fail.
    Fail { chunks: Vec<StreamChunk>, error: ExecutorError },
    /// Stream the chunks, then wait for `release` before resolving.
    Held { chunks: Vec<StreamChunk>, release: Arc<Notify> },
    /// Never resolve.
    Hang,
}

impl Script {
    /// Stream plain output fragments.
    pub fn output(chunks: &[&str]) -> Self {
        Script::Stream {
            chunks: chunks.iter().map(|c| StreamChunk::output(*c)).collect(),
            approval: None,
        }
    }

    pub fn chunks(chunks: Vec<StreamChunk>) -> Self {
        Script::Stream { chunks, approval: None }
    }

    pub fn fail(error: ExecutorError) -> Self {
        Script::Fail { chunks: Vec::new(), error }
    }

    /// Stream output fragments and hold until `release` is notified.
    pub fn held(chunks: &[&str], release: Arc<Notify>) -> Self {
        Script::Held { chunks: chunks.iter().map(|c| StreamChunk::output(*c)).collect(), release }
    }

    /// Resolve with `description` regardless of the streamed text.
    pub fn with_approval(self, description: impl Into<String>) -> Self {
        match self {
            Script::Stream { chunks, .. } => {
                Script::Stream { chunks, approval: Some(description.into()) }
            }
            other => other,
        }
    }
}

impl Default for Script {
    fn default() -> Self {
        Script::Stream { chunks: Vec::new(), approval: None }
    }
}

/// Recorded executor invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorCall {
    pub agent_id: AgentId,
    pub template: String,
    pub command: String,
}

#[derive(Default)]
struct FakeExecutorState {
    scripts: HashMap<String, VecDeque<Script>>,
    default: Script,
    calls: Vec<ExecutorCall>,
    resets: Vec<AgentId>,
    reset_hold: Option<Arc<Notify>>,
}

/// Fake executor answering from per-command script queues.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    inner: Arc<Mutex<FakeExecutorState>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a script for the next call with exactly `command`.
    pub fn script(&self, command: &str, script: Script) -> &Self {
        self.inner.lock().scripts.entry(command.to_string()).or_default().push_back(script);
        self
    }

    /// Make the next `reset` wait for `release` after recording the call.
    pub fn hold_next_reset(&self, release: Arc<Notify>) {
        self.inner.lock().reset_hold = Some(release);
    }

    /// Script used when no queued script matches.
    pub fn set_default(&self, script: Script) {
        self.inner.lock().default = script;
    }

    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.inner.lock().calls.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.inner.lock().calls.iter().map(|c| c.command.clone()).collect()
    }

    pub fn resets(&self) -> Vec<AgentId> {
        self.inner.lock().resets.clone()
    }

    fn next_script(&self, request: &CommandRequest) -> Script {
        let mut inner = self.inner.lock();
        inner.calls.push(ExecutorCall {
            agent_id: request.agent_id.clone(),
            template: request.template.clone(),
            command: request.command.clone(),
        });
        let queued = inner.scripts.get_mut(&request.command).and_then(VecDeque::pop_front);
        queued.unwrap_or_else(|| inner.default.clone())
    }
}

#[async_trait]
impl CommandExecutor for FakeExecutor {
    async fn send_command(
        &self,
        request: CommandRequest,
        chunks: ChunkSender,
    ) -> Result<Option<String>, ExecutorError> {
        match self.next_script(&request) {
            Script::Stream { chunks: items, approval } => {
                let text = stream_all(&chunks, items).await?;
                Ok(approval.or_else(|| extract_approval(&text).map(str::to_string)))
            }
            Script::Fail { chunks: items, error } => {
                stream_all(&chunks, items).await?;
                Err(error)
            }
            Script::Held { chunks: items, release } => {
                let text = stream_all(&chunks, items).await?;
                release.notified().await;
                Ok(extract_approval(&text).map(str::to_string))
            }
            Script::Hang => std::future::pending().await,
        }
    }

    async fn reset(&self, agent_id: &AgentId) {
        let hold = {
            let mut inner = self.inner.lock();
            inner.resets.push(agent_id.clone());
            inner.reset_hold.take()
        };
        if let Some(release) = hold {
            release.notified().await;
        }
    }
}

/// Emit every chunk, returning the concatenated output text.
async fn stream_all(chunks: &ChunkSender, items: Vec<StreamChunk>) -> Result<String, ExecutorError> {
    let mut text = String::new();
    for item in items {
        if let StreamChunk::Output(ref s) = item {
            text.push_str(s);
        }
        emit(chunks, item).await?;
    }
    Ok(text)
}
