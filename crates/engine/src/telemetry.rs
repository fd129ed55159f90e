// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Synthetic telemetry feeder
//!
//! Produces ambient host metrics, per-agent resource snapshots and canned
//! events. It reads agent status but never writes it.

use crate::runtime::Runtime;
use fg_adapters::CommandExecutor;
use fg_core::{AgentStatus, Clock, EventCategory, ResourceUsage};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const SYSTEM_MESSAGES: &[&str] = &[
    "Verifying SSL handshake with host...",
    "Garbage collection started [PID 4092]",
    "Updating local package registry...",
    "Keep-alive packet sent to tunnel",
    "Re-allocating PRoot memory blocks",
    "Indexing filesystem changes...",
];

pub const SECURITY_MESSAGES: &[&str] = &[
    "Port scan detected on 192.168.1.x (Ignored)",
    "HITL Request: File access verification",
    "Token refresh successful",
    "Encrypted tunnel re-established",
];

const EVENT_PROBABILITY: f64 = 0.4;
const SECURITY_SHARE: f64 = 0.2;

pub const DEFAULT_CPU_HISTORY: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuSample {
    pub timestamp_ms: u64,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub up_kbps: u32,
    pub down_kbps: u32,
    pub latency_ms: u32,
}

impl Default for NetworkStats {
    fn default() -> Self {
        Self { up_kbps: 12, down_kbps: 45, latency_ms: 24 }
    }
}

/// Latest host metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemMetrics {
    pub cpu_history: VecDeque<CpuSample>,
    pub network: NetworkStats,
    pub ticks: u64,
}

impl SystemMetrics {
    pub fn latest_cpu(&self) -> Option<u8> {
        self.cpu_history.back().map(|s| s.percent)
    }
}

/// Periodic producer of synthetic metrics and events.
pub struct TelemetryFeeder {
    rng: StdRng,
    metrics: Arc<Mutex<SystemMetrics>>,
    history_len: usize,
}

impl TelemetryFeeder {
    pub fn new(history_len: usize) -> Self {
        Self::with_rng(StdRng::from_entropy(), history_len)
    }

    /// Deterministic feeder for tests.
    pub fn seeded(seed: u64, history_len: usize) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), history_len)
    }

    fn with_rng(rng: StdRng, history_len: usize) -> Self {
        Self {
            rng,
            metrics: Arc::new(Mutex::new(SystemMetrics::default())),
            history_len: history_len.max(1),
        }
    }

    /// Snapshot of the current metrics.
    pub fn metrics(&self) -> SystemMetrics {
        self.metrics.lock().clone()
    }

    /// Handle for reading metrics after the feeder is spawned.
    pub fn shared_metrics(&self) -> Arc<Mutex<SystemMetrics>> {
        Arc::clone(&self.metrics)
    }

    /// Emit the host connection events.
    pub fn announce<E: CommandExecutor, C: Clock>(&self, runtime: &Runtime<E, C>) {
        runtime.emit_event(EventCategory::Network, "Secure Bridge established via WireGuard");
        runtime.emit_event(EventCategory::Security, "Host verified: sha256:8f4a...");
    }

    /// Produce one round of samples.
    pub fn tick<E: CommandExecutor, C: Clock>(&mut self, runtime: &Runtime<E, C>) {
        let now = runtime.clock().epoch_ms();
        let cpu = self.rng.gen_range(10..50);
        let network = NetworkStats {
            up_kbps: self.rng.gen_range(10..60),
            down_kbps: self.rng.gen_range(50..350),
            latency_ms: self.rng.gen_range(20..40),
        };
        {
            let mut metrics = self.metrics.lock();
            while metrics.cpu_history.len() >= self.history_len {
                metrics.cpu_history.pop_front();
            }
            metrics.cpu_history.push_back(CpuSample { timestamp_ms: now, percent: cpu });
            metrics.network = network;
            metrics.ticks += 1;
        }

        let rng = &mut self.rng;
        runtime.refresh_resources(|status, ram_limit_mb| sample_usage(rng, status, ram_limit_mb));

        if self.rng.gen_bool(EVENT_PROBABILITY) {
            let (category, pool) = if self.rng.gen_bool(SECURITY_SHARE) {
                (EventCategory::Security, SECURITY_MESSAGES)
            } else {
                (EventCategory::System, SYSTEM_MESSAGES)
            };
            if let Some(message) = pool.choose(&mut self.rng) {
                runtime.emit_event(category, *message);
            }
        }
    }

    /// Announce, then tick every `interval` until the task is aborted.
    pub fn spawn<E: CommandExecutor, C: Clock>(
        mut self,
        runtime: Runtime<E, C>,
        interval: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.announce(&runtime);
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.tick(&runtime);
            }
        })
    }
}

fn sample_usage(rng: &mut StdRng, status: &AgentStatus, ram_limit_mb: u32) -> ResourceUsage {
    match status {
        AgentStatus::Running => ResourceUsage {
            cpu_percent: rng.gen_range(0..80),
            ram_mb: rng.gen_range(100..600).min(ram_limit_mb),
        },
        _ => ResourceUsage { cpu_percent: rng.gen_range(0..5), ram_mb: 50 },
    }
}

#[cfg(test)]
#[path = "telemetry_tests.rs"]
mod tests;
