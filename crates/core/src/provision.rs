// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provisioning request validation.

use crate::agent::{AgentConfig, Priority};
use crate::template::TemplateCatalog;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors rejecting a provisioning request before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    #[error("agent name must not be empty")]
    EmptyName,
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
    #[error("ram limit {got}MB outside allowed range {min}..={max}MB")]
    RamLimitOutOfRange { got: u32, min: u32, max: u32 },
}

/// Allowed range for an agent's RAM limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for RamLimits {
    fn default() -> Self {
        Self { min: 128, max: 2048 }
    }
}

impl RamLimits {
    pub fn contains(&self, mb: u32) -> bool {
        (self.min..=self.max).contains(&mb)
    }

    /// Bring `mb` into range; an inverted range yields `max`.
    pub fn fit(&self, mb: u32) -> u32 {
        mb.max(self.min).min(self.max)
    }

    /// RAM limit used when a request does not choose one.
    pub fn default_limit(&self) -> u32 {
        self.fit(AgentConfig::default().ram_limit_mb)
    }
}

/// A request to provision one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRequest {
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub config: AgentConfig,
}

impl ProvisionRequest {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self { name: name.into(), template: template.into(), config: AgentConfig::default() }
    }

    pub fn ram_limit_mb(mut self, mb: u32) -> Self {
        self.config.ram_limit_mb = mb;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.config.priority = priority;
        self
    }

    /// Check the request against the catalog and RAM limits.
    ///
    /// Returns the trimmed name on success.
    pub fn validate(
        &self,
        catalog: &TemplateCatalog,
        limits: &RamLimits,
    ) -> Result<String, ProvisionError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProvisionError::EmptyName);
        }
        if !catalog.contains(&self.template) {
            return Err(ProvisionError::UnknownTemplate(self.template.clone()));
        }
        if !limits.contains(self.config.ram_limit_mb) {
            return Err(ProvisionError::RamLimitOutOfRange {
                got: self.config.ram_limit_mb,
                min: limits.min,
                max: limits.max,
            });
        }
        Ok(name.to_string())
    }
}

#[cfg(test)]
#[path = "provision_tests.rs"]
mod tests;
