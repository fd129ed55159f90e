// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    approved = { Verdict::Approved, "APPROVED" },
    denied   = { Verdict::Denied, "DENIED" },
)]
fn verdict_resume_command(verdict: Verdict, expected: &str) {
    assert_eq!(verdict.resume_command(), expected);
}

#[test]
fn verdict_display() {
    assert_eq!(Verdict::Approved.to_string(), "approved");
    assert_eq!(Verdict::Denied.to_string(), "denied");
}

#[test]
fn decision_wait_time() {
    let decision = Decision {
        action: "rm -rf /data".to_string(),
        verdict: Verdict::Denied,
        requested_at_ms: 1_000,
        decided_at_ms: 4_500,
    };
    assert_eq!(decision.wait_ms(), 3_500);
}

#[test]
fn decision_wait_saturates() {
    let decision = Decision {
        action: "x".to_string(),
        verdict: Verdict::Approved,
        requested_at_ms: 5_000,
        decided_at_ms: 4_000,
    };
    assert_eq!(decision.wait_ms(), 0);
}
