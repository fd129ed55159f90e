// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the console.
//!
//! `FG_CONFIG` is read by clap as the `--config` fallback.

use std::path::PathBuf;
use std::time::Duration;

/// Default config location: XDG_CONFIG_HOME/fg/fg.toml; used only if present.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fg").join("fg.toml"))
}

/// Executor call timeout override (`FG_COMMAND_TIMEOUT_MS`)
pub fn command_timeout() -> Option<Duration> {
    millis("FG_COMMAND_TIMEOUT_MS")
}

/// Telemetry tick interval override (`FG_TELEMETRY_INTERVAL_MS`)
pub fn telemetry_interval() -> Option<Duration> {
    millis("FG_TELEMETRY_INTERVAL_MS")
}

/// Simulated executor fragment delay override (`FG_STREAM_DELAY_MS`)
pub fn stream_delay() -> Option<Duration> {
    millis("FG_STREAM_DELAY_MS")
}

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.trim().parse::<u64>().ok()).map(Duration::from_millis)
}
