// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command sessions
//!
//! A session takes one command from submission to a terminal status:
//!
//! ```text
//! begin:  Idle | Error  ->  Running        (echo appended)
//! run:    Running       ->  Idle           (completed)
//!                       ->  AwaitingApproval(action)
//!                       ->  Error          (executor failure, in-band error, timeout)
//! ```
//!
//! `begin` is synchronous; `run` streams chunks into the transcript and
//! reconciles the status once the executor resolves.

use super::{Acknowledgment, Runtime};
use crate::error::Rejection;
use fg_adapters::{CommandExecutor, CommandRequest, ExecutorError, StreamChunk};
use fg_core::{
    extract_approval, AgentId, AgentStatus, Clock, EventCategory, Severity, TranscriptEntry,
    Verdict,
};
use std::time::Duration;
use tokio::sync::mpsc;

/// Capacity of the chunk channel between executor and session.
const CHUNK_BUFFER: usize = 64;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Stream finished without an approval request
    Completed,
    /// Suspended at the approval gate
    AwaitingApproval(String),
    /// An in-band error chunk was streamed
    StreamError(String),
    /// The executor call failed
    Failed(ExecutorError),
    /// The executor did not resolve within the command timeout
    TimedOut(Duration),
}

impl SessionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionOutcome::Completed)
    }
}

fg_core::simple_display! {
    SessionOutcome {
        Completed => "completed",
        AwaitingApproval(..) => "awaiting approval",
        StreamError(..) => "stream error",
        Failed(..) => "failed",
        TimedOut(..) => "timed out",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionKind {
    /// An operator command; may end at the approval gate
    Command,
    /// Synthetic follow-up after an operator decision
    Resume(Verdict),
}

/// What the executor produced for one call.
struct Streamed {
    result: Result<Result<Option<String>, ExecutorError>, Duration>,
    text: String,
    in_band_error: Option<String>,
}

/// A session whose optimistic phase is applied and whose stream has not
/// started yet.
#[must_use = "a session does nothing until run"]
pub struct CommandSession<E, C: Clock> {
    runtime: Runtime<E, C>,
    request: CommandRequest,
    kind: SessionKind,
    ack: Option<Acknowledgment>,
}

impl<E, C> CommandSession<E, C>
where
    E: CommandExecutor,
    C: Clock,
{
    pub fn agent_id(&self) -> &AgentId {
        &self.request.agent_id
    }

    pub fn command(&self) -> &str {
        &self.request.command
    }

    /// Stream the executor's response and reconcile the agent's status.
    pub async fn run(self) -> SessionOutcome {
        let Self { runtime, request, kind, ack } = self;
        let agent_id = request.agent_id.clone();
        let command = request.command.clone();
        let streamed = runtime.stream(request).await;
        let outcome = match kind {
            SessionKind::Command => runtime.finish_command(&agent_id, streamed),
            SessionKind::Resume(Verdict::Approved) => runtime.finish_approved(&agent_id, streamed),
            SessionKind::Resume(Verdict::Denied) => runtime.finish_denied(&agent_id, streamed),
        };
        drop(ack);
        tracing::info!(agent_id = %agent_id, command = %command, %outcome, "session finished");
        outcome
    }
}

impl<E, C> Runtime<E, C>
where
    E: CommandExecutor,
    C: Clock,
{
    /// Submit a command and run it to a terminal status.
    pub async fn submit(&self, id: &AgentId, text: &str) -> Result<SessionOutcome, Rejection> {
        Ok(self.begin(id, text)?.run().await)
    }

    /// Optimistic phase of a submission.
    ///
    /// Admitted only while the agent is `Idle` or `Error` and not
    /// acknowledging a denial: sets `Running` and appends the operator echo,
    /// both before any executor work.
    pub fn begin(&self, id: &AgentId, text: &str) -> Result<CommandSession<E, C>, Rejection> {
        let command = text.trim();
        let now = self.clock.epoch_ms();
        let admitted = self.lock_state_mut(|state| {
            if !state.agents.contains_key(id) {
                return Err(Rejection::UnknownAgent(id.clone()));
            }
            if command.is_empty() {
                return Err(Rejection::EmptyCommand);
            }
            let record = state.admit(id)?;
            record.set_status(AgentStatus::Running, now);
            record.transcript.append(TranscriptEntry::echo(command, now));
            Ok(record.template.clone())
        });

        let template = match admitted {
            Ok(template) => template,
            Err(rejection) => {
                tracing::debug!(agent_id = %id, command, %rejection, "submission rejected");
                return Err(rejection);
            }
        };
        tracing::info!(agent_id = %id, command, "session started");
        let request = CommandRequest::new(id.clone(), template, command);
        Ok(self.session(request, SessionKind::Command, None))
    }

    pub(super) fn resume_session(
        &self,
        id: &AgentId,
        template: String,
        verdict: Verdict,
        ack: Option<Acknowledgment>,
    ) -> CommandSession<E, C> {
        let request = CommandRequest::new(id.clone(), template, verdict.resume_command());
        self.session(request, SessionKind::Resume(verdict), ack)
    }

    fn session(
        &self,
        request: CommandRequest,
        kind: SessionKind,
        ack: Option<Acknowledgment>,
    ) -> CommandSession<E, C> {
        CommandSession { runtime: self.clone(), request, kind, ack }
    }

    /// Call the executor, applying each chunk to the transcript as it arrives.
    async fn stream(&self, request: CommandRequest) -> Streamed {
        let agent_id = request.agent_id.clone();
        let (tx, mut rx) = mpsc::channel(CHUNK_BUFFER);
        let mut text = String::new();
        let mut in_band_error = None;

        let call = self.executor.send_command(request, tx);
        let pump = async {
            tokio::pin!(call);
            loop {
                tokio::select! {
                    biased;
                    Some(chunk) = rx.recv() => {
                        self.apply_chunk(&agent_id, chunk, &mut text, &mut in_band_error);
                    }
                    result = &mut call => break result,
                }
            }
        };
        let result = match self.config.command_timeout {
            Some(limit) => tokio::time::timeout(limit, pump).await.map_err(|_| limit),
            None => Ok(pump.await),
        };

        // Chunks sent just before the executor resolved
        while let Ok(chunk) = rx.try_recv() {
            self.apply_chunk(&agent_id, chunk, &mut text, &mut in_band_error);
        }
        Streamed { result, text, in_band_error }
    }

    fn apply_chunk(
        &self,
        id: &AgentId,
        chunk: StreamChunk,
        text: &mut String,
        in_band_error: &mut Option<String>,
    ) {
        let now = self.clock.epoch_ms();
        match chunk {
            StreamChunk::Output(fragment) => {
                if fragment.is_empty() {
                    return;
                }
                text.push_str(&fragment);
                self.with_record(id, |record| record.push_chunk(&fragment, now));
            }
            StreamChunk::Error(message) => {
                tracing::warn!(agent_id = %id, error = %message, "in-band executor error");
                self.with_record(id, |record| record.note(Severity::Error, &message, now));
                in_band_error.get_or_insert(message);
            }
        }
    }

    fn finish_command(&self, id: &AgentId, streamed: Streamed) -> SessionOutcome {
        let now = self.clock.epoch_ms();
        let returned = match self.settle_failure(id, &streamed, now) {
            Ok(returned) => returned,
            Err(outcome) => return outcome,
        };

        let action = extract_approval(&streamed.text).map(str::to_string).or(returned);
        let Some(action) = action else {
            self.with_record(id, |record| record.set_status(AgentStatus::Idle, now));
            return SessionOutcome::Completed;
        };

        let name = self.with_record(id, |record| {
            record.set_status(AgentStatus::AwaitingApproval(action.clone()), now);
            record.name.clone()
        });
        if let Some(name) = name {
            self.emit_event(
                EventCategory::Security,
                format!("Agent {} requested elevated permission: {}", name, action),
            );
        }
        tracing::info!(agent_id = %id, action = %action, "approval requested");
        SessionOutcome::AwaitingApproval(action)
    }

    fn finish_approved(&self, id: &AgentId, streamed: Streamed) -> SessionOutcome {
        let now = self.clock.epoch_ms();
        if let Err(outcome) = self.settle_failure(id, &streamed, now) {
            return outcome;
        }
        if let Some(action) = extract_approval(&streamed.text) {
            tracing::warn!(agent_id = %id, action, "nested approval request ignored");
        }
        self.with_record(id, |record| record.set_status(AgentStatus::Idle, now));
        SessionOutcome::Completed
    }

    /// The agent is already idle; failures are only logged.
    fn finish_denied(&self, id: &AgentId, streamed: Streamed) -> SessionOutcome {
        match streamed.result {
            Err(limit) => {
                tracing::warn!(agent_id = %id, timeout_ms = limit.as_millis() as u64, "denial acknowledgment timed out");
                SessionOutcome::TimedOut(limit)
            }
            Ok(Err(error)) => {
                tracing::warn!(agent_id = %id, %error, "denial acknowledgment failed");
                SessionOutcome::Failed(error)
            }
            Ok(Ok(_)) => match streamed.in_band_error {
                Some(message) => SessionOutcome::StreamError(message),
                None => SessionOutcome::Completed,
            },
        }
    }

    /// Move the agent to `Error` if the call failed, timed out, or streamed an
    /// in-band error. Otherwise hand back the executor's approval description.
    fn settle_failure(
        &self,
        id: &AgentId,
        streamed: &Streamed,
        now: u64,
    ) -> Result<Option<String>, SessionOutcome> {
        let outcome = match &streamed.result {
            Err(limit) => {
                let ms = limit.as_millis() as u64;
                tracing::warn!(agent_id = %id, timeout_ms = ms, "command timed out");
                self.with_record(id, |record| {
                    record.note(Severity::Error, format!("Command timed out after {}ms.", ms), now);
                });
                SessionOutcome::TimedOut(*limit)
            }
            Ok(Err(error)) => {
                tracing::warn!(agent_id = %id, %error, "executor failed");
                SessionOutcome::Failed(error.clone())
            }
            Ok(Ok(returned)) => match &streamed.in_band_error {
                Some(message) => SessionOutcome::StreamError(message.clone()),
                None => return Ok(returned.clone()),
            },
        };
        self.with_record(id, |record| record.set_status(AgentStatus::Error, now));
        Err(outcome)
    }
}
