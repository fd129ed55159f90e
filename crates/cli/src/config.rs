// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console configuration (`fg.toml`)

use fg_core::{Priority, ProvisionRequest, RamLimits, TemplateCatalog};
use fg_engine::RuntimeConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// An agent provisioned when the console starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapAgent {
    pub name: String,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_limit_mb: Option<u32>,
    #[serde(default)]
    pub priority: Priority,
}

impl BootstrapAgent {
    pub fn new(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
            ram_limit_mb: None,
            priority: Priority::Normal,
        }
    }

    /// Without an explicit RAM limit, the default is fitted into `limits`.
    pub fn request(&self, limits: &RamLimits) -> ProvisionRequest {
        let ram = self.ram_limit_mb.unwrap_or_else(|| limits.default_limit());
        ProvisionRequest::new(&self.name, &self.template).ram_limit_mb(ram).priority(self.priority)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub telemetry_interval_ms: u64,
    pub cpu_history_len: usize,
    pub event_retention: usize,
    /// Absent means executor calls never time out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_timeout_ms: Option<u64>,
    pub stream_delay_ms: u64,
    /// Write logs here instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub ram_limit_mb: RamLimits,
    pub templates: TemplateCatalog,
    pub bootstrap: Vec<BootstrapAgent>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telemetry_interval_ms: 1000,
            cpu_history_len: 30,
            event_retention: 50,
            command_timeout_ms: None,
            stream_delay_ms: 40,
            log_file: None,
            ram_limit_mb: RamLimits::default(),
            templates: TemplateCatalog::default(),
            bootstrap: vec![
                BootstrapAgent::new("Main Console", "DevOps Engineer"),
                BootstrapAgent::new("Sentinel One", "Security Researcher"),
            ],
        }
    }
}

impl Config {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::parse(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Resolve the config to use: explicit path, else the default location
    /// if it exists, else built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        match crate::env::default_config_path() {
            Some(path) if path.is_file() => Ok((Self::load(&path)?, Some(path))),
            _ => Ok((Self::default(), None)),
        }
    }

    /// Apply `FG_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(timeout) = crate::env::command_timeout() {
            self.command_timeout_ms = Some(timeout.as_millis() as u64);
        }
        if let Some(interval) = crate::env::telemetry_interval() {
            self.telemetry_interval_ms = interval.as_millis() as u64;
        }
        if let Some(delay) = crate::env::stream_delay() {
            self.stream_delay_ms = delay.as_millis() as u64;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ram_limit_mb.min > self.ram_limit_mb.max {
            return Err(ConfigError::Invalid(format!(
                "ram_limit_mb.min ({}) exceeds ram_limit_mb.max ({})",
                self.ram_limit_mb.min, self.ram_limit_mb.max
            )));
        }
        if self.templates.is_empty() {
            return Err(ConfigError::Invalid("template catalog is empty".to_string()));
        }
        if self.telemetry_interval_ms == 0 {
            return Err(ConfigError::Invalid("telemetry_interval_ms must be positive".to_string()));
        }
        if self.command_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("command_timeout_ms must be positive".to_string()));
        }
        for agent in &self.bootstrap {
            agent
                .request(&self.ram_limit_mb)
                .validate(&self.templates, &self.ram_limit_mb)
                .map_err(|e| ConfigError::Invalid(format!("bootstrap agent {:?}: {}", agent.name, e)))?;
        }
        Ok(())
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        let config = RuntimeConfig::default()
            .catalog(self.templates.clone())
            .ram_limits(self.ram_limit_mb)
            .event_retention(self.event_retention);
        match self.command_timeout_ms {
            Some(ms) => config.command_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }

    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_millis(self.telemetry_interval_ms)
    }

    pub fn stream_delay(&self) -> Duration {
        Duration::from_millis(self.stream_delay_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
