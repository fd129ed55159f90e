// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent identifier, lifecycle status and resource types.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a provisioned agent.
    ///
    /// Generated at provisioning time and stable for the agent's lifetime.
    pub struct AgentId("agt-");
}

/// Lifecycle status of an agent.
///
/// The pending action of an approval gate lives inside `AwaitingApproval`,
/// so an agent has a pending action exactly when it is awaiting approval.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "pending_action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    /// Ready for a new command
    #[default]
    Idle,
    /// A command session is streaming
    Running,
    /// Halted on a sensitive action until the operator approves or denies it
    AwaitingApproval(String),
    /// The last session failed; a new command or a reset recovers
    Error,
    /// Not reachable
    Offline,
}

impl AgentStatus {
    /// Description of the action awaiting approval, if any.
    pub fn pending_action(&self) -> Option<&str> {
        match self {
            AgentStatus::AwaitingApproval(action) => Some(action),
            _ => None,
        }
    }

    pub fn kind(&self) -> AgentStatusKind {
        AgentStatusKind::from(self)
    }

    /// Whether a new command may be submitted from this status.
    ///
    /// `Running` is excluded so two streams never interleave in one transcript.
    pub fn accepts_commands(&self) -> bool {
        matches!(self, AgentStatus::Idle | AgentStatus::Error)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::AwaitingApproval(action) => write!(f, "awaiting approval: {}", action),
            other => write!(f, "{}", other.kind().as_str().to_lowercase()),
        }
    }
}

/// Tag-only variant of [`AgentStatus`] for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatusKind {
    Idle,
    Running,
    AwaitingApproval,
    Error,
    Offline,
}

impl AgentStatusKind {
    pub const ALL: [AgentStatusKind; 5] = [
        AgentStatusKind::Idle,
        AgentStatusKind::Running,
        AgentStatusKind::AwaitingApproval,
        AgentStatusKind::Error,
        AgentStatusKind::Offline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatusKind::Idle => "IDLE",
            AgentStatusKind::Running => "RUNNING",
            AgentStatusKind::AwaitingApproval => "AWAITING_APPROVAL",
            AgentStatusKind::Error => "ERROR",
            AgentStatusKind::Offline => "OFFLINE",
        }
    }

    /// Short label shown in a terminal pane header.
    pub fn label(&self) -> &'static str {
        match self {
            AgentStatusKind::Idle => "IDLE",
            AgentStatusKind::Running => "ACTIVE",
            AgentStatusKind::AwaitingApproval => "WAITING",
            AgentStatusKind::Error => "ERROR",
            AgentStatusKind::Offline => "OFFLINE",
        }
    }
}

impl From<&AgentStatus> for AgentStatusKind {
    fn from(s: &AgentStatus) -> Self {
        match s {
            AgentStatus::Idle => AgentStatusKind::Idle,
            AgentStatus::Running => AgentStatusKind::Running,
            AgentStatus::AwaitingApproval(_) => AgentStatusKind::AwaitingApproval,
            AgentStatus::Error => AgentStatusKind::Error,
            AgentStatus::Offline => AgentStatusKind::Offline,
        }
    }
}

impl fmt::Display for AgentStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling priority requested at provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

crate::simple_display! {
    Priority {
        Low => "low",
        Normal => "normal",
        High => "high",
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// Resource configuration chosen at provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub ram_limit_mb: u32,
    #[serde(default)]
    pub priority: Priority,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { ram_limit_mb: 512, priority: Priority::Normal }
    }
}

/// Point-in-time resource snapshot, refreshed by telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// 0–100
    pub cpu_percent: u8,
    pub ram_mb: u32,
}

impl Default for ResourceUsage {
    fn default() -> Self {
        Self { cpu_percent: 0, ram_mb: 128 }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
