// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-agent conversation state owned by an executor.

use fg_core::AgentId;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Keyed store of executor sessions, created lazily on first use.
#[derive(Debug)]
pub struct SessionStore<S> {
    sessions: Mutex<HashMap<AgentId, S>>,
}

impl<S: Default> SessionStore<S> {
    pub fn new() -> Self {
        Self { sessions: Mutex::new(HashMap::new()) }
    }

    /// Run `f` against the agent's session, creating it if absent.
    pub fn with<T>(&self, agent_id: &AgentId, f: impl FnOnce(&mut S) -> T) -> T {
        let mut sessions = self.sessions.lock();
        f(sessions.entry(agent_id.clone()).or_default())
    }

    /// Discard the agent's session. Returns whether one existed.
    pub fn reset(&self, agent_id: &AgentId) -> bool {
        self.sessions.lock().remove(agent_id).is_some()
    }

    pub fn contains(&self, agent_id: &AgentId) -> bool {
        self.sessions.lock().contains_key(agent_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

impl<S: Default> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
