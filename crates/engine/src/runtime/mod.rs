// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervision runtime
//!
//! Owns the fleet state shared by every command session. All mutations of a
//! record happen under the state lock in one step, and the lock is never
//! held across an await.

mod fleet;
mod gate;
mod housekeeping;
mod session;

pub use session::{CommandSession, SessionOutcome};

use crate::error::Rejection;
use fg_adapters::CommandExecutor;
use fg_core::{
    AgentId, AgentRecord, Clock, EventCategory, EventLog, GlobalEvent, RamLimits, TemplateCatalog,
};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Tunables of the runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub catalog: TemplateCatalog,
    pub ram_limits: RamLimits,
    /// Upper bound for one executor call; `None` waits indefinitely
    pub command_timeout: Option<Duration>,
    pub event_retention: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog: TemplateCatalog::default(),
            ram_limits: RamLimits::default(),
            command_timeout: None,
            event_retention: EventLog::DEFAULT_RETENTION,
        }
    }
}

impl RuntimeConfig {
    fg_core::setters! {
        set {
            catalog: TemplateCatalog,
            ram_limits: RamLimits,
            event_retention: usize,
        }
        option {
            command_timeout: Duration,
        }
    }
}

/// Shared mutable state: the fleet registry and the global event feed.
#[derive(Debug)]
pub struct FleetState {
    /// Insertion-ordered for stable display
    pub agents: IndexMap<AgentId, AgentRecord>,
    pub events: EventLog,
    /// Denied agents whose `DENIED` acknowledgment is still streaming
    pub acknowledging: HashSet<AgentId>,
}

impl FleetState {
    pub fn new(event_retention: usize) -> Self {
        Self {
            agents: IndexMap::new(),
            events: EventLog::new(event_retention),
            acknowledging: HashSet::new(),
        }
    }

    /// The record of an agent that may start new executor work.
    ///
    /// Refused while a stream is running, at the approval gate, or while a
    /// denial is being acknowledged.
    pub(crate) fn admit(&mut self, id: &AgentId) -> Result<&mut AgentRecord, Rejection> {
        let acknowledging = self.acknowledging.contains(id);
        let record = self.agents.get_mut(id).ok_or_else(|| Rejection::UnknownAgent(id.clone()))?;
        if !record.status.accepts_commands() {
            return Err(Rejection::Busy { id: id.clone(), status: record.status.kind() });
        }
        if acknowledging {
            return Err(Rejection::Acknowledging(id.clone()));
        }
        Ok(record)
    }
}

/// Marks an agent as acknowledging a denial until dropped.
pub(crate) struct Acknowledgment {
    state: Arc<Mutex<FleetState>>,
    id: AgentId,
}

impl Drop for Acknowledgment {
    fn drop(&mut self) {
        self.state.lock().acknowledging.remove(&self.id);
    }
}

/// Runtime driving agents through command sessions and the approval gate
pub struct Runtime<E, C: Clock> {
    state: Arc<Mutex<FleetState>>,
    executor: Arc<E>,
    clock: C,
    config: Arc<RuntimeConfig>,
}

impl<E, C: Clock> Clone for Runtime<E, C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            executor: Arc::clone(&self.executor),
            clock: self.clock.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<E, C> Runtime<E, C>
where
    E: CommandExecutor,
    C: Clock,
{
    pub fn new(executor: E, clock: C, config: RuntimeConfig) -> Self {
        Self::with_executor(Arc::new(executor), clock, config)
    }

    /// Create a runtime sharing an executor with its caller.
    pub fn with_executor(executor: Arc<E>, clock: C, config: RuntimeConfig) -> Self {
        let state = FleetState::new(config.event_retention);
        Self {
            state: Arc::new(Mutex::new(state)),
            executor,
            clock,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn executor(&self) -> &Arc<E> {
        &self.executor
    }

    /// Append a global event.
    pub fn emit_event(&self, category: EventCategory, message: impl Into<String>) -> GlobalEvent {
        let now = self.clock.epoch_ms();
        let message = message.into();
        tracing::debug!(%category, %message, "event");
        self.lock_state_mut(|state| state.events.push(category, message, now).clone())
    }

    /// The `n` most recent global events, oldest first.
    pub fn recent_events(&self, n: usize) -> Vec<GlobalEvent> {
        self.lock_state(|state| state.events.recent(n))
    }

    /// Run `f` on a record, if it exists.
    pub(crate) fn with_record<T>(
        &self,
        id: &AgentId,
        f: impl FnOnce(&mut AgentRecord) -> T,
    ) -> Option<T> {
        self.lock_state_mut(|state| state.agents.get_mut(id).map(f))
    }

    /// Hold new work off `id` until the returned guard is dropped.
    ///
    /// Call with the state lock held via `state`.
    pub(crate) fn acknowledgment(&self, state: &mut FleetState, id: &AgentId) -> Acknowledgment {
        state.acknowledging.insert(id.clone());
        Acknowledgment { state: Arc::clone(&self.state), id: id.clone() }
    }

    /// Helper to lock state and read from it
    pub(crate) fn lock_state<T>(&self, f: impl FnOnce(&FleetState) -> T) -> T {
        let state = self.state.lock();
        f(&state)
    }

    /// Helper to lock state and mutate it
    pub(crate) fn lock_state_mut<T>(&self, f: impl FnOnce(&mut FleetState) -> T) -> T {
        let mut state = self.state.lock();
        f(&mut state)
    }
}

#[cfg(test)]
#[path = "../runtime_tests/mod.rs"]
mod tests;
