// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet registry tests

use super::*;
use crate::view::ViewFilter;
use fg_core::{Priority, ProvisionError};
use yare::parameterized;

#[test]
fn provision_creates_idle_record_with_seed_entry() {
    let ctx = setup();
    let request = ProvisionRequest::new("  Main Console ", "DevOps Engineer")
        .ram_limit_mb(1024)
        .priority(Priority::High);

    let id = ctx.runtime.provision(request).unwrap();

    let record = ctx.record(&id);
    assert_eq!(record.name, "Main Console");
    assert_eq!(record.template, "DevOps Engineer");
    assert_eq!(record.status, AgentStatus::Idle);
    assert_eq!(record.config.ram_limit_mb, 1024);
    assert_eq!(record.transcript.len(), 1);
    let seed = &record.transcript.entries()[0];
    assert_eq!(seed.source, EntrySource::SystemNote);
    assert!(seed.content.contains("DevOps Engineer"));
    assert!(seed.content.contains("1024MB"));
}

#[test]
fn provision_emits_agent_event() {
    let ctx = setup();
    ctx.provision("Sentinel One", "Security Researcher");

    let events = ctx.runtime.recent_events(5);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category, EventCategory::Agent);
    assert_eq!(events[0].message, "Provisioned new agent: Sentinel One [Security Researcher]");
}

#[parameterized(
    empty_name = { "   ", "Python Coder", 512, ProvisionError::EmptyName },
    unknown_template = { "x", "Chef", 512, ProvisionError::UnknownTemplate("Chef".into()) },
    ram_low = { "x", "Python Coder", 64, ProvisionError::RamLimitOutOfRange { got: 64, min: 128, max: 2048 } },
)]
fn invalid_requests_change_nothing(name: &str, template: &str, ram: u32, expected: ProvisionError) {
    let ctx = setup();
    let err = ctx
        .runtime
        .provision(ProvisionRequest::new(name, template).ram_limit_mb(ram))
        .unwrap_err();

    assert_eq!(err, expected);
    assert_eq!(ctx.runtime.agent_count(), 0);
    assert!(ctx.runtime.recent_events(5).is_empty());
}

#[test]
fn ids_are_unique() {
    let ctx = setup();
    let a = ctx.provision("same", "Python Coder");
    let b = ctx.provision("same", "Python Coder");
    assert_ne!(a, b);
    assert_eq!(ctx.runtime.agent_count(), 2);
}

#[test]
fn list_preserves_provisioning_order() {
    let ctx = setup();
    for name in ["c", "a", "b"] {
        ctx.provision(name, "Python Coder");
    }

    let names: Vec<_> = ctx.runtime.list(|_| true).into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn list_is_recomputed_on_every_call() {
    let ctx = setup();
    let id = ctx.provision("a", "Python Coder");
    let gated = |r: &AgentRecord| r.pending_action().is_some();
    assert!(ctx.runtime.list(gated).is_empty());

    ctx.gate(&id, "rm x").await;

    assert_eq!(ctx.runtime.list(gated).len(), 1);
}

#[test]
fn views_follow_template_families() {
    let ctx = setup();
    ctx.provision("ops", "DevOps Engineer");
    ctx.provision("data", "Data Analyst");
    ctx.provision("sec", "Security Researcher");
    ctx.provision("py", "Python Coder");

    let names = |filter: ViewFilter| -> Vec<String> {
        ctx.runtime.view(filter).into_iter().map(|r| r.name).collect()
    };
    assert_eq!(names(ViewFilter::All).len(), 4);
    assert_eq!(names(ViewFilter::DevOps), vec!["ops", "data"]);
    assert_eq!(names(ViewFilter::Security), vec!["sec"]);
}

#[tokio::test]
async fn summary_counts_statuses() {
    let ctx = setup();
    let a = ctx.provision("a", "Python Coder");
    ctx.provision("b", "Python Coder");
    ctx.gate(&a, "sudo ls").await;

    let summary = ctx.runtime.summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.awaiting_approval, 1);
    assert_eq!(summary.idle, 1);
}

#[test]
fn resolve_by_id_prefix_or_name() {
    let ctx = setup();
    let a = ctx.provision("Main Console", "DevOps Engineer");
    let b = ctx.provision("Sentinel One", "Security Researcher");

    assert_eq!(ctx.runtime.resolve(a.as_str()), Some(a.clone()));
    assert_eq!(ctx.runtime.resolve(&a.as_str()[..10]), Some(a.clone()));
    assert_eq!(ctx.runtime.resolve(a.short(6)), Some(a.clone()));
    assert_eq!(ctx.runtime.resolve("Sentinel One"), Some(b));
    assert_eq!(ctx.runtime.resolve("agt-"), None);
    assert_eq!(ctx.runtime.resolve("nobody"), None);
    assert_eq!(ctx.runtime.resolve(""), None);
}

#[test]
fn get_unknown_is_none() {
    let ctx = setup();
    assert!(ctx.runtime.get(&AgentId::from_string("agt-missing")).is_none());
}
