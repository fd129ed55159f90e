// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fg-adapters: collaborators at the edge of the supervision core

pub mod executor;

pub use executor::{
    ChunkSender, CommandExecutor, CommandRequest, ExecutorError, SessionStore, SimulatedExecutor,
    StreamChunk,
};

#[cfg(any(test, feature = "test-support"))]
pub use executor::{ExecutorCall, FakeExecutor, Script};
