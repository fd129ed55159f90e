// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet registry: provisioning, lookup and views

use super::Runtime;
use crate::view::{FleetSummary, ViewFilter};
use fg_adapters::CommandExecutor;
use fg_core::{AgentId, AgentRecord, Clock, EventCategory, ProvisionError, ProvisionRequest};

impl<E, C> Runtime<E, C>
where
    E: CommandExecutor,
    C: Clock,
{
    /// Create an idle agent from a validated request.
    ///
    /// Validation happens before any state changes. Emits an `agent` event.
    pub fn provision(&self, request: ProvisionRequest) -> Result<AgentId, ProvisionError> {
        let name = request.validate(&self.config.catalog, &self.config.ram_limits)?;
        let now = self.clock.epoch_ms();
        let id = AgentId::new();
        let record = AgentRecord::new(id.clone(), &name, &request.template, request.config, now);

        self.lock_state_mut(|state| {
            state.agents.insert(id.clone(), record);
            state.events.push(
                EventCategory::Agent,
                format!("Provisioned new agent: {} [{}]", name, request.template),
                now,
            );
        });

        tracing::info!(
            agent_id = %id,
            name = %name,
            template = %request.template,
            ram_limit_mb = request.config.ram_limit_mb,
            priority = %request.config.priority,
            "provisioned agent"
        );
        Ok(id)
    }

    /// Snapshot of one record.
    pub fn get(&self, id: &AgentId) -> Option<AgentRecord> {
        self.lock_state(|state| state.agents.get(id).cloned())
    }

    /// Snapshots of the records matching `predicate`, in provisioning order.
    ///
    /// Recomputed on every call.
    pub fn list(&self, predicate: impl Fn(&AgentRecord) -> bool) -> Vec<AgentRecord> {
        self.lock_state(|state| state.agents.values().filter(|r| predicate(r)).cloned().collect())
    }

    pub fn view(&self, filter: ViewFilter) -> Vec<AgentRecord> {
        self.list(|record| filter.matches(record))
    }

    pub fn summary(&self) -> FleetSummary {
        self.lock_state(|state| FleetSummary::of(state.agents.values()))
    }

    pub fn agent_count(&self) -> usize {
        self.lock_state(|state| state.agents.len())
    }

    /// Look up an agent by exact id, exact name, or unique id prefix.
    ///
    /// Prefixes match either the full id or its suffix after `agt-`.
    pub fn resolve(&self, key: &str) -> Option<AgentId> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        self.lock_state(|state| {
            if let Some((id, _)) = state.agents.get_key_value(key) {
                return Some(id.clone());
            }
            let mut named = state.agents.values().filter(|r| r.name == key);
            if let (Some(record), None) = (named.next(), named.next()) {
                return Some(record.id.clone());
            }
            let mut prefixed = state
                .agents
                .keys()
                .filter(|id| id.as_str().starts_with(key) || id.suffix().starts_with(key));
            match (prefixed.next(), prefixed.next()) {
                (Some(id), None) => Some(id.clone()),
                _ => None,
            }
        })
    }
}
