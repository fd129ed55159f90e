// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript clearing, export and executor session reset

use super::Runtime;
use crate::error::Rejection;
use fg_adapters::CommandExecutor;
use fg_core::{AgentId, AgentStatus, Clock, EventCategory, ResourceUsage, Severity};

/// Transcript note appended after an executor session reset.
pub const RESET_NOTE: &str = "Session reset.";

impl<E, C> Runtime<E, C>
where
    E: CommandExecutor,
    C: Clock,
{
    /// Replace the agent's transcript with a single "logs cleared." note.
    ///
    /// Status is untouched; a running stream continues into a fresh entry.
    pub fn clear(&self, id: &AgentId) -> Result<(), Rejection> {
        let now = self.clock.epoch_ms();
        self.with_record(id, |record| {
            record.transcript.clear(now);
            record.updated_at_ms = now;
        })
        .ok_or_else(|| Rejection::UnknownAgent(id.clone()))?;
        tracing::debug!(agent_id = %id, "transcript cleared");
        Ok(())
    }

    /// Plain-text rendering of the agent's transcript.
    pub fn export(&self, id: &AgentId) -> Result<String, Rejection> {
        self.lock_state(|state| state.agents.get(id).map(|r| r.transcript.export()))
            .ok_or_else(|| Rejection::UnknownAgent(id.clone()))
    }

    /// Discard the executor's conversation state for an idle or failed agent.
    ///
    /// Leaves the agent `Idle` with a "Session reset." note. Refused if the
    /// agent started new work while the executor was resetting.
    pub async fn reset(&self, id: &AgentId) -> Result<(), Rejection> {
        self.lock_state_mut(|state| state.admit(id).map(|_| ()))?;

        self.executor.reset(id).await;

        let now = self.clock.epoch_ms();
        let applied: Result<(), Rejection> = self.lock_state_mut(|state| {
            let record = state.admit(id)?;
            record.set_status(AgentStatus::Idle, now);
            record.note(Severity::Info, RESET_NOTE, now);
            let message = format!("Reset session for agent: {}", record.name);
            state.events.push(EventCategory::Agent, message, now);
            Ok(())
        });
        if let Err(rejection) = &applied {
            tracing::warn!(agent_id = %id, %rejection, "agent became busy during session reset");
            return applied;
        }
        tracing::info!(agent_id = %id, "executor session reset");
        Ok(())
    }

    /// Overwrite resource snapshots; status is read, never written.
    pub fn refresh_resources(
        &self,
        mut sample: impl FnMut(&AgentStatus, u32) -> ResourceUsage,
    ) {
        self.lock_state_mut(|state| {
            for record in state.agents.values_mut() {
                record.resource_usage = sample(&record.status, record.config.ram_limit_mb);
            }
        });
    }
}
