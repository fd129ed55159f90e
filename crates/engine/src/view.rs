// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display views over the fleet.

use fg_core::{AgentRecord, AgentStatusKind};
use serde::Serialize;
use std::str::FromStr;

/// Sidebar filter of the operator dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFilter {
    #[default]
    All,
    /// Templates mentioning "devops" or "data"
    DevOps,
    /// Templates mentioning "security"
    Security,
}

fg_core::simple_display! {
    ViewFilter {
        All => "all",
        DevOps => "devops",
        Security => "security",
    }
}

impl ViewFilter {
    pub fn matches(&self, record: &AgentRecord) -> bool {
        let template = record.template.to_lowercase();
        match self {
            ViewFilter::All => true,
            ViewFilter::DevOps => template.contains("devops") || template.contains("data"),
            ViewFilter::Security => template.contains("security"),
        }
    }
}

impl FromStr for ViewFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ViewFilter::All),
            "devops" => Ok(ViewFilter::DevOps),
            "security" => Ok(ViewFilter::Security),
            other => Err(format!("unknown view: {}", other)),
        }
    }
}

/// Agent counts per status kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FleetSummary {
    pub total: usize,
    pub idle: usize,
    pub running: usize,
    pub awaiting_approval: usize,
    pub error: usize,
    pub offline: usize,
}

impl FleetSummary {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a AgentRecord>) -> Self {
        let mut summary = FleetSummary::default();
        for record in records {
            summary.total += 1;
            match record.status.kind() {
                AgentStatusKind::Idle => summary.idle += 1,
                AgentStatusKind::Running => summary.running += 1,
                AgentStatusKind::AwaitingApproval => summary.awaiting_approval += 1,
                AgentStatusKind::Error => summary.error += 1,
                AgentStatusKind::Offline => summary.offline += 1,
            }
        }
        summary
    }

    pub fn count(&self, kind: AgentStatusKind) -> usize {
        match kind {
            AgentStatusKind::Idle => self.idle,
            AgentStatusKind::Running => self.running,
            AgentStatusKind::AwaitingApproval => self.awaiting_approval,
            AgentStatusKind::Error => self.error,
            AgentStatusKind::Offline => self.offline,
        }
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
