// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fg-engine: fleet registry, command sessions and the approval gate

mod error;
mod runtime;
pub mod telemetry;
pub mod view;

pub use error::Rejection;
pub use runtime::{CommandSession, FleetState, Runtime, RuntimeConfig, SessionOutcome};
pub use telemetry::{CpuSample, NetworkStats, SystemMetrics, TelemetryFeeder};
pub use view::{FleetSummary, ViewFilter};
