// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fg-core: Core types for the fleetgate agent supervision console

pub mod macros;

pub mod agent;
pub mod agent_record;
pub mod clock;
pub mod decision;
pub mod event;
pub mod id;
pub mod marker;
pub mod provision;
pub mod template;
pub mod time_fmt;
pub mod transcript;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use agent::{AgentConfig, AgentId, AgentStatus, AgentStatusKind, Priority, ResourceUsage};
pub use agent_record::AgentRecord;
pub use clock::{Clock, FakeClock, SystemClock};
pub use decision::{Decision, Verdict};
pub use event::{EventCategory, EventId, EventLog, GlobalEvent};
pub use id::short;
pub use marker::{approval_marker, extract_approval, APPROVED, DENIED};
pub use provision::{ProvisionError, ProvisionRequest, RamLimits};
pub use template::{Template, TemplateCatalog};
pub use time_fmt::{format_clock, format_elapsed_ms, format_rfc3339};
pub use transcript::{
    EntryId, EntrySource, Severity, Transcript, TranscriptEntry, CLEARED_NOTE, ECHO_MARKER,
};
