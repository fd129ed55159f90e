// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests over random operation sequences

use super::*;
use fg_core::{extract_approval, APPROVED, DENIED};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Submit(Vec<String>),
    SubmitGated(String),
    Approve,
    Deny,
    Clear,
    Reset,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        fg_core::test_support::strategies::arb_chunks().prop_map(Op::Submit),
        "[a-z]{1,8}( /[a-z]{1,8})?".prop_map(Op::SubmitGated),
        Just(Op::Approve),
        Just(Op::Deny),
        Just(Op::Clear),
        Just(Op::Reset),
    ]
}

fn check_invariants(ctx: &TestContext, id: &AgentId) {
    let record = ctx.record(id);
    assert!(!record.transcript.is_empty());
    assert_eq!(
        record.status.kind() == AgentStatusKind::AwaitingApproval,
        record.pending_action().is_some()
    );
    let stamps: Vec<_> = record.transcript.iter().map(|e| e.timestamp_ms).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_across_operations(ops in prop::collection::vec(arb_op(), 1..24)) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let ctx = setup();
            let id = ctx.provision("A", "DevOps Engineer");
            check_invariants(&ctx, &id);

            for op in ops {
                match op {
                    Op::Submit(chunks) => {
                        let before = ctx.status(&id);
                        if before.accepts_commands() {
                            let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
                            ctx.executor.script("cmd", Script::output(&refs));
                        }
                        let result = ctx.runtime.submit(&id, "cmd").await;
                        if before.accepts_commands() {
                            prop_assert_eq!(result, Ok(SessionOutcome::Completed));
                            let joined: String = chunks.concat();
                            if !joined.is_empty() {
                                prop_assert_eq!(ctx.contents(&id).last().cloned(), Some(joined));
                            }
                        } else {
                            prop_assert!(result.is_err());
                            prop_assert_eq!(ctx.status(&id), before);
                        }
                    }
                    Op::SubmitGated(action) => {
                        let marker = fg_core::approval_marker(&action);
                        let was_open = ctx.status(&id).accepts_commands();
                        if was_open {
                            ctx.executor.script("gated", Script::output(&["> ", marker.as_str()]));
                        }
                        let _ = ctx.runtime.submit(&id, "gated").await;
                        if was_open {
                            let record = ctx.record(&id);
                            prop_assert_eq!(record.pending_action(), extract_approval(&marker));
                        }
                    }
                    Op::Approve => {
                        let gated = ctx.record(&id).pending_action().is_some();
                        prop_assert_eq!(ctx.runtime.approve(&id).await.is_ok(), gated);
                        if gated {
                            prop_assert_eq!(ctx.status(&id), AgentStatus::Idle);
                        }
                    }
                    Op::Deny => {
                        let gated = ctx.record(&id).pending_action().is_some();
                        prop_assert_eq!(ctx.runtime.deny(&id).await.is_ok(), gated);
                        if gated {
                            prop_assert_eq!(ctx.status(&id), AgentStatus::Idle);
                        }
                    }
                    Op::Clear => {
                        ctx.runtime.clear(&id).unwrap();
                    }
                    Op::Reset => {
                        let _ = ctx.runtime.reset(&id).await;
                    }
                }
                check_invariants(&ctx, &id);
            }

            let resumes = ctx
                .executor
                .commands()
                .into_iter()
                .filter(|c| c == APPROVED || c == DENIED)
                .count();
            let decisions = ctx.record(&id).decisions.len();
            prop_assert_eq!(resumes, decisions);
            Ok(())
        })?;
    }
}
