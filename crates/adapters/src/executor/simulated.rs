// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic terminal simulator.
//!
//! Stands in for a real agent process: answers a handful of shell-like
//! commands, flags dangerous ones with an approval marker, and streams
//! every response in small fragments.

use super::{
    emit, fragments, ChunkSender, CommandExecutor, CommandRequest, ExecutorError, SessionStore,
    StreamChunk,
};
use async_trait::async_trait;
use fg_core::{approval_marker, extract_approval, AgentId, APPROVED, DENIED};
use std::time::Duration;

/// Commands whose first word requires operator approval.
pub const DANGEROUS_WORDS: &[&str] =
    &["rm", "sudo", "ip", "shutdown", "reboot", "mkfs", "dd", "chmod", "kill"];

const FRAGMENT_CHARS: usize = 6;

#[derive(Debug, Default)]
struct SimSession {
    history: Vec<String>,
    pending: Option<String>,
}

/// Executor that simulates a sandboxed Linux terminal.
#[derive(Debug)]
pub struct SimulatedExecutor {
    sessions: SessionStore<SimSession>,
    delay: Duration,
}

impl SimulatedExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { sessions: SessionStore::new(), delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of agents with live conversation state.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn respond(&self, request: &CommandRequest) -> String {
        let command = request.command.trim();
        self.sessions.with(&request.agent_id, |session| match command {
            APPROVED => match session.pending.take() {
                Some(action) => format!(
                    "Permission granted.\nExecuting: {}\n[ok] {} completed.\n",
                    action, action
                ),
                None => "No pending action to approve.\n".to_string(),
            },
            DENIED => match session.pending.take() {
                Some(action) => format!("Permission denied.\nAborted: {}\n", action),
                None => "Permission denied.\n".to_string(),
            },
            _ => {
                session.history.push(command.to_string());
                if is_dangerous(command) {
                    session.pending = Some(command.to_string());
                    format!(
                        "Analyzing request...\nOperation requires elevated privileges.\n{}\n",
                        approval_marker(command)
                    )
                } else {
                    answer(command, &request.template, &session.history)
                }
            }
        })
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(Duration::from_millis(40))
    }
}

#[async_trait]
impl CommandExecutor for SimulatedExecutor {
    async fn send_command(
        &self,
        request: CommandRequest,
        chunks: ChunkSender,
    ) -> Result<Option<String>, ExecutorError> {
        let text = self.respond(&request);
        tracing::debug!(agent_id = %request.agent_id, command = %request.command, "simulating command");

        for fragment in fragments(&text, FRAGMENT_CHARS) {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            emit(&chunks, StreamChunk::Output(fragment)).await?;
        }
        Ok(extract_approval(&text).map(str::to_string))
    }

    async fn reset(&self, agent_id: &AgentId) {
        if self.sessions.reset(agent_id) {
            tracing::debug!(%agent_id, "discarded simulated session");
        }
    }
}

/// Whether any command in a `;`/`&&`/`|` chain starts with a dangerous word.
pub fn is_dangerous(command: &str) -> bool {
    command
        .split([';', '|', '&'])
        .filter_map(|part| part.split_whitespace().next())
        .any(|word| DANGEROUS_WORDS.contains(&word))
}

fn answer(command: &str, template: &str, history: &[String]) -> String {
    let mut words = command.split_whitespace();
    match words.next().unwrap_or_default() {
        "" => "\n".to_string(),
        "pwd" => "/workspace\n".to_string(),
        "whoami" => "agent\n".to_string(),
        "ls" => "total 0\n".to_string(),
        "echo" => format!("{}\n", words.collect::<Vec<_>>().join(" ")),
        "uname" => "Linux sandbox 6.1.0 x86_64 GNU/Linux\n".to_string(),
        "history" => history
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:>4}  {}\n", i + 1, c))
            .collect(),
        _ => format!(
            "[{}] Resolving context...\nExecuting: {}\nDone.\n",
            template, command
        ),
    }
}

#[cfg(test)]
#[path = "simulated_tests.rs"]
mod tests;
