// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command executor adapters
//!
//! The `CommandExecutor` trait is the boundary to whatever interprets an
//! operator's free-text instruction. An executor:
//! - streams its response as ordered, non-empty text fragments
//! - resolves with the approval description when the response asked for one
//! - keeps its own per-agent conversation state, discarded by `reset`

mod session;
mod simulated;

pub use session::SessionStore;
pub use simulated::SimulatedExecutor;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ExecutorCall, FakeExecutor, Script};

use async_trait::async_trait;
use fg_core::AgentId;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from executor operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    #[error("connection to agent process failed: {0}")]
    Connection(String),
    #[error("command rejected: {0}")]
    Rejected(String),
    #[error("chunk receiver closed")]
    StreamClosed,
}

/// One item of a streamed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    /// A fragment of output text
    Output(String),
    /// An in-band error reported without failing the call
    Error(String),
}

impl StreamChunk {
    pub fn output(text: impl Into<String>) -> Self {
        StreamChunk::Output(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        StreamChunk::Error(text.into())
    }
}

/// A single command addressed to an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub agent_id: AgentId,
    /// Template name of the agent, shaping how the command is interpreted
    pub template: String,
    pub command: String,
}

impl CommandRequest {
    pub fn new(agent_id: AgentId, template: impl Into<String>, command: impl Into<String>) -> Self {
        Self { agent_id, template: template.into(), command: command.into() }
    }
}

/// Sending half of a response stream.
pub type ChunkSender = mpsc::Sender<StreamChunk>;

/// Adapter for interpreting agent commands
#[async_trait]
pub trait CommandExecutor: Send + Sync + 'static {
    /// Run one command.
    ///
    /// Chunks are sent on `chunks` in the order they are produced, all before
    /// this call resolves. Resolves with the description from an
    /// `[[APPROVAL_REQUIRED: ...]]` marker in the full response, if present.
    async fn send_command(
        &self,
        request: CommandRequest,
        chunks: ChunkSender,
    ) -> Result<Option<String>, ExecutorError>;

    /// Discard the per-agent conversation state.
    async fn reset(&self, agent_id: &AgentId);
}

/// Send a chunk, mapping a dropped receiver to [`ExecutorError::StreamClosed`].
pub async fn emit(chunks: &ChunkSender, chunk: StreamChunk) -> Result<(), ExecutorError> {
    chunks.send(chunk).await.map_err(|_| ExecutorError::StreamClosed)
}

/// Split `text` into fragments of at most `max_chars` characters.
pub fn fragments(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(max_chars).map(|c| c.iter().collect()).collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
