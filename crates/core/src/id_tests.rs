// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::{AgentId, EntryId};

#[test]
fn generated_ids_carry_prefix_and_are_unique() {
    let a = AgentId::new();
    let b = AgentId::new();
    assert!(a.as_str().starts_with("agt-"));
    assert_eq!(a.suffix().len(), 12);
    assert_ne!(a, b);
}

#[test]
fn from_string_preserves_value() {
    let id = AgentId::from_string("agt-abc123");
    assert_eq!(id.as_str(), "agt-abc123");
    assert_eq!(id.suffix(), "abc123");
    assert_eq!(id, "agt-abc123");
}

#[test]
fn suffix_without_prefix_is_whole_id() {
    let id = EntryId::from_string("init");
    assert_eq!(id.suffix(), "init");
}

#[yare::parameterized(
    shorter = { "abc", 8, "abc" },
    exact   = { "abcd", 4, "abcd" },
    longer  = { "abcdefgh", 3, "abc" },
    empty   = { "", 3, "" },
)]
fn short_truncates(input: &str, n: usize, expected: &str) {
    assert_eq!(crate::short(input, n), expected);
}

#[test]
fn id_short_uses_suffix() {
    let id = AgentId::from_string("agt-0123456789ab");
    assert_eq!(id.short(4), "0123");
}

#[test]
fn id_serde_is_transparent() {
    let id = AgentId::from_string("agt-x1");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"agt-x1\"");
    let parsed: AgentId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}
