// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate state of one provisioned agent.
//!
//! An `AgentRecord` is the unit of concurrent mutation: every change to an
//! agent's status or transcript happens to one record under one lock.

use crate::agent::{AgentConfig, AgentId, AgentStatus, ResourceUsage};
use crate::decision::Decision;
use crate::transcript::{Severity, Transcript, TranscriptEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,
    pub name: String,
    /// Catalog template name
    pub template: String,
    pub status: AgentStatus,
    pub transcript: Transcript,
    pub resource_usage: ResourceUsage,
    pub config: AgentConfig,
    /// Resolved approval requests, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decisions: Vec<Decision>,
    pub created_at_ms: u64,
    /// Epoch milliseconds of the last status transition
    pub status_changed_at_ms: u64,
    pub updated_at_ms: u64,
}

impl AgentRecord {
    /// Create an idle record whose transcript is seeded with an initialization note.
    pub fn new(
        id: AgentId,
        name: impl Into<String>,
        template: impl Into<String>,
        config: AgentConfig,
        now_ms: u64,
    ) -> Self {
        let template = template.into();
        let seed = TranscriptEntry::note(Severity::Info, seed_text(&template, &config), now_ms);
        Self {
            id,
            name: name.into(),
            template,
            status: AgentStatus::Idle,
            transcript: Transcript::seeded(seed),
            resource_usage: ResourceUsage::default(),
            config,
            decisions: Vec::new(),
            created_at_ms: now_ms,
            status_changed_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    pub fn pending_action(&self) -> Option<&str> {
        self.status.pending_action()
    }

    pub fn set_status(&mut self, status: AgentStatus, now_ms: u64) {
        if self.status != status {
            self.status_changed_at_ms = now_ms;
        }
        self.status = status;
        self.updated_at_ms = now_ms;
    }

    /// Append a system note to the transcript.
    pub fn note(&mut self, severity: Severity, content: impl Into<String>, now_ms: u64) {
        self.transcript.append(TranscriptEntry::note(severity, content, now_ms));
        self.updated_at_ms = now_ms;
    }

    /// Apply one streamed output chunk to the transcript.
    pub fn push_chunk(&mut self, chunk: &str, now_ms: u64) {
        self.transcript.append_or_coalesce_chunk(chunk, now_ms);
        self.updated_at_ms = now_ms;
    }

    pub fn uptime_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at_ms)
    }
}

fn seed_text(template: &str, config: &AgentConfig) -> String {
    format!(
        "Initializing sandbox workspace for {}...\nMounting local filesystem...\nMemory limit: {}MB, priority: {}\nAgent ready.",
        template, config.ram_limit_mb, config.priority
    )
}

#[cfg(test)]
#[path = "agent_record_tests.rs"]
mod tests;
