// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet-wide event feed.
//!
//! Informational only: the control logic appends to it, nothing reads it back
//! to make decisions. Oldest entries are dropped beyond the retention window.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

crate::define_id! {
    /// Unique identifier for a global event.
    pub struct EventId("evt-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    System,
    Network,
    Security,
    Agent,
}

crate::simple_display! {
    EventCategory {
        System => "system",
        Network => "network",
        Security => "security",
        Agent => "agent",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalEvent {
    pub id: EventId,
    pub timestamp_ms: u64,
    pub message: String,
    pub category: EventCategory,
}

/// Bounded, append-only event log.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<GlobalEvent>,
    retention: usize,
}

impl EventLog {
    pub const DEFAULT_RETENTION: usize = 50;

    pub fn new(retention: usize) -> Self {
        let retention = retention.max(1);
        Self { events: VecDeque::with_capacity(retention), retention }
    }

    pub fn push(
        &mut self,
        category: EventCategory,
        message: impl Into<String>,
        timestamp_ms: u64,
    ) -> &GlobalEvent {
        while self.events.len() >= self.retention {
            self.events.pop_front();
        }
        self.events.push_back(GlobalEvent {
            id: EventId::new(),
            timestamp_ms,
            message: message.into(),
            category,
        });
        &self.events[self.events.len() - 1]
    }

    /// Events oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GlobalEvent> {
        self.events.iter()
    }

    /// The `n` most recent events, oldest first.
    pub fn recent(&self, n: usize) -> Vec<GlobalEvent> {
        let skip = self.events.len().saturating_sub(n);
        self.events.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RETENTION)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
