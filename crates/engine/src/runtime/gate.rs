// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval gate
//!
//! An agent at `AwaitingApproval` accepts exactly one decision. The decision
//! is applied synchronously, then the executor is re-invoked with the
//! synthetic `APPROVED` or `DENIED` command.

use super::{CommandSession, Runtime, SessionOutcome};
use crate::error::Rejection;
use fg_adapters::CommandExecutor;
use fg_core::{AgentId, AgentStatus, Clock, Decision, EventCategory, Severity, Verdict};

/// Transcript note appended when the operator approves.
pub const APPROVED_NOTE: &str = "Action approved by Admin.";

/// Transcript note appended when the operator denies.
pub const DENIED_NOTE: &str = "Permission Denied by Admin.";

impl<E, C> Runtime<E, C>
where
    E: CommandExecutor,
    C: Clock,
{
    /// Approve the pending action and stream the executor's follow-up.
    ///
    /// The agent returns to `Idle` when the follow-up completes, or `Error`
    /// if it fails. The follow-up is not checked for a further approval
    /// request.
    pub async fn approve(&self, id: &AgentId) -> Result<SessionOutcome, Rejection> {
        Ok(self.decide(id, Verdict::Approved)?.run().await)
    }

    /// Deny the pending action.
    ///
    /// The agent is `Idle` as soon as this is applied; the executor's
    /// acknowledgment is streamed into the transcript afterwards. New
    /// commands and resets are refused until the acknowledgment ends.
    pub async fn deny(&self, id: &AgentId) -> Result<SessionOutcome, Rejection> {
        Ok(self.decide(id, Verdict::Denied)?.run().await)
    }

    /// Apply an operator decision and return the follow-up session.
    ///
    /// Rejected unless the agent is awaiting approval, so a repeated decision
    /// is a no-op.
    pub fn decide(
        &self,
        id: &AgentId,
        verdict: Verdict,
    ) -> Result<CommandSession<E, C>, Rejection> {
        let now = self.clock.epoch_ms();
        let applied = self.lock_state_mut(|state| {
            let record =
                state.agents.get_mut(id).ok_or_else(|| Rejection::UnknownAgent(id.clone()))?;
            let action = record
                .pending_action()
                .map(str::to_string)
                .ok_or_else(|| Rejection::NoPendingAction(id.clone()))?;

            record.decisions.push(Decision {
                action: action.clone(),
                verdict,
                requested_at_ms: record.status_changed_at_ms,
                decided_at_ms: now,
            });
            match verdict {
                Verdict::Approved => {
                    record.set_status(AgentStatus::Running, now);
                    record.note(Severity::Success, APPROVED_NOTE, now);
                }
                Verdict::Denied => {
                    record.set_status(AgentStatus::Idle, now);
                    record.note(Severity::Warning, DENIED_NOTE, now);
                }
            }
            let message = match verdict {
                Verdict::Approved => format!("Admin APPROVED action for {}", record.name),
                Verdict::Denied => format!("Admin DENIED action for {}", record.name),
            };
            let template = record.template.clone();
            state.events.push(EventCategory::Security, message, now);
            let ack = match verdict {
                Verdict::Approved => None,
                Verdict::Denied => Some(self.acknowledgment(state, id)),
            };
            Ok((action, template, ack))
        });

        let (action, template, ack) = match applied {
            Ok(applied) => applied,
            Err(rejection) => {
                tracing::debug!(agent_id = %id, %verdict, %rejection, "decision rejected");
                return Err(rejection);
            }
        };
        tracing::info!(agent_id = %id, %verdict, action = %action, "approval decided");
        Ok(self.resume_session(id, template, verdict, ack))
    }
}
