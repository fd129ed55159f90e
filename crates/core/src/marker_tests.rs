// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    trailing     = { "Step 1\n[[APPROVAL_REQUIRED: delete /tmp/cache]]", Some("delete /tmp/cache") },
    leading      = { "[[APPROVAL_REQUIRED: rm -rf /]] waiting", Some("rm -rf /") },
    first_only   = { "[[APPROVAL_REQUIRED: a]] [[APPROVAL_REQUIRED: b]]", Some("a") },
    non_greedy   = { "[[APPROVAL_REQUIRED: x]] tail ]]", Some("x") },
    empty_desc   = { "[[APPROVAL_REQUIRED: ]]", Some("") },
    absent       = { "total 0\n", None },
    no_space     = { "[[APPROVAL_REQUIRED:x]]", None },
    unterminated = { "[[APPROVAL_REQUIRED: reboot", None },
)]
fn extracts_first_marker(text: &str, expected: Option<&str>) {
    assert_eq!(extract_approval(text), expected);
}

#[test]
fn marker_spanning_chunks_is_found_in_concatenation() {
    let chunks = ["Analyzing...\n[[APPROVAL_", "REQUIRED: sudo ", "reboot]", "]"];
    assert!(chunks.iter().all(|c| extract_approval(c).is_none()));
    assert_eq!(extract_approval(&chunks.concat()), Some("sudo reboot"));
}

#[test]
fn rendered_marker_round_trips() {
    let marker = approval_marker("ip link set eth0 down");
    assert_eq!(extract_approval(&marker), Some("ip link set eth0 down"));
}
