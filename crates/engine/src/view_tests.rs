// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fg_core::test_support::idle_record;
use fg_core::AgentStatus;
use yare::parameterized;

#[parameterized(
    all_python = { ViewFilter::All, "Python Coder", true },
    devops = { ViewFilter::DevOps, "DevOps Engineer", true },
    devops_data = { ViewFilter::DevOps, "Data Analyst", true },
    devops_rejects_security = { ViewFilter::DevOps, "Security Researcher", false },
    security = { ViewFilter::Security, "Security Researcher", true },
    security_rejects_python = { ViewFilter::Security, "Python Coder", false },
)]
fn filter_matches_template(filter: ViewFilter, template: &str, expected: bool) {
    let record = idle_record("agt-1", "a", template);
    assert_eq!(filter.matches(&record), expected);
}

#[test]
fn filter_parses_case_insensitively() {
    assert_eq!("DevOps".parse::<ViewFilter>().unwrap(), ViewFilter::DevOps);
    assert_eq!("SECURITY".parse::<ViewFilter>().unwrap(), ViewFilter::Security);
    assert!("ops".parse::<ViewFilter>().is_err());
}

#[test]
fn summary_counts_each_kind() {
    let mut a = idle_record("agt-1", "a", "Python Coder");
    let mut b = idle_record("agt-2", "b", "Python Coder");
    let c = idle_record("agt-3", "c", "Python Coder");
    a.set_status(AgentStatus::Running, 1);
    b.set_status(AgentStatus::AwaitingApproval("rm".into()), 1);

    let summary = FleetSummary::of([&a, &b, &c]);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.count(AgentStatusKind::Idle), 1);
    assert_eq!(summary.count(AgentStatusKind::Running), 1);
    assert_eq!(summary.count(AgentStatusKind::AwaitingApproval), 1);
    assert_eq!(summary.count(AgentStatusKind::Error), 0);
}
