// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{AgentConfig, AgentId, AgentRecord};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::agent::AgentStatus;
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = AgentStatus> {
        prop_oneof![
            Just(AgentStatus::Idle),
            Just(AgentStatus::Running),
            "[a-z /-]{0,16}".prop_map(AgentStatus::AwaitingApproval),
            Just(AgentStatus::Error),
            Just(AgentStatus::Offline),
        ]
    }

    /// Non-empty text fragments as an executor would stream them.
    pub fn arb_chunks() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-zA-Z0-9 .\\n]{1,8}", 0..16)
    }
}

// ── Record factories ────────────────────────────────────────────────────

/// An idle record with the default config, created at `1_000_000` ms.
pub fn idle_record(id: &str, name: &str, template: &str) -> AgentRecord {
    AgentRecord::new(AgentId::from_string(id), name, template, AgentConfig::default(), 1_000_000)
}
