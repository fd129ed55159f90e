// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator decisions on gated agent actions.

use crate::marker::{APPROVED, DENIED};
use serde::{Deserialize, Serialize};

/// The operator's answer to an approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Denied,
}

crate::simple_display! {
    Verdict {
        Approved => "approved",
        Denied => "denied",
    }
}

impl Verdict {
    /// Synthetic command forwarded to the executor for this verdict.
    pub fn resume_command(&self) -> &'static str {
        match self {
            Verdict::Approved => APPROVED,
            Verdict::Denied => DENIED,
        }
    }
}

/// A resolved approval request, kept as an audit trail on the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Description of the gated action, as emitted by the executor
    pub action: String,
    pub verdict: Verdict,
    pub requested_at_ms: u64,
    pub decided_at_ms: u64,
}

impl Decision {
    /// How long the agent was held at the gate.
    pub fn wait_ms(&self) -> u64 {
        self.decided_at_ms.saturating_sub(self.requested_at_ms)
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
