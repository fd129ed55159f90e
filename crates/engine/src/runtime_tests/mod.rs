// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod fleet;
mod gate;
mod housekeeping;
mod properties;
mod sessions;

use super::*;
use crate::error::Rejection;
use fg_adapters::{FakeExecutor, Script, StreamChunk};
use fg_core::{
    AgentStatus, AgentStatusKind, EntrySource, FakeClock, ProvisionRequest, Severity,
    TranscriptEntry, Verdict,
};

type TestRuntime = Runtime<FakeExecutor, FakeClock>;

struct TestContext {
    runtime: TestRuntime,
    executor: FakeExecutor,
    clock: FakeClock,
}

fn setup() -> TestContext {
    setup_with(RuntimeConfig::default())
}

fn setup_with(config: RuntimeConfig) -> TestContext {
    let executor = FakeExecutor::new();
    let clock = FakeClock::new();
    let runtime = Runtime::new(executor.clone(), clock.clone(), config);
    TestContext { runtime, executor, clock }
}

impl TestContext {
    fn provision(&self, name: &str, template: &str) -> AgentId {
        self.runtime.provision(ProvisionRequest::new(name, template)).unwrap()
    }

    fn record(&self, id: &AgentId) -> AgentRecord {
        self.runtime.get(id).unwrap()
    }

    fn status(&self, id: &AgentId) -> AgentStatus {
        self.record(id).status
    }

    fn entries(&self, id: &AgentId) -> Vec<TranscriptEntry> {
        self.record(id).transcript.entries().to_vec()
    }

    fn contents(&self, id: &AgentId) -> Vec<String> {
        self.entries(id).into_iter().map(|e| e.content).collect()
    }

    fn event_messages(&self) -> Vec<String> {
        self.runtime.recent_events(100).into_iter().map(|e| e.message).collect()
    }

    /// Drive an agent to the approval gate with `action` pending.
    async fn gate(&self, id: &AgentId, action: &str) {
        let marker = fg_core::approval_marker(action);
        self.executor.script(action, Script::output(&["Checking...\n", marker.as_str()]));
        let outcome = self.runtime.submit(id, action).await.unwrap();
        assert_eq!(outcome, SessionOutcome::AwaitingApproval(action.to_string()));
    }
}
