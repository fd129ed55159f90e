// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Refusals of runtime operations.

use fg_core::{AgentId, AgentStatusKind};
use thiserror::Error;

/// Why an operation was refused.
///
/// A rejected operation changes no state: no status transition, no
/// transcript entry, no event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown agent: {0}")]
    UnknownAgent(AgentId),
    #[error("command is empty")]
    EmptyCommand,
    #[error("agent {id} is {status}")]
    Busy { id: AgentId, status: AgentStatusKind },
    #[error("agent {0} has no pending action")]
    NoPendingAction(AgentId),
    #[error("agent {0} is still acknowledging a denial")]
    Acknowledging(AgentId),
}
