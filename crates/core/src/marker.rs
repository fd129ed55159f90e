// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval marker wire format.
//!
//! An executor halts on a sensitive action by emitting
//! `[[APPROVAL_REQUIRED: <description>]]` anywhere in its response. The marker
//! may span chunk boundaries, so it is only ever searched for in the complete
//! concatenated response text.

use regex::Regex;
use std::sync::LazyLock;

/// Synthetic command sent to the executor after the operator approves.
pub const APPROVED: &str = "APPROVED";

/// Synthetic command sent to the executor after the operator denies.
pub const DENIED: &str = "DENIED";

/// `[[APPROVAL_REQUIRED: <text>]]`, non-greedy, single line.
#[allow(clippy::expect_used)]
static APPROVAL_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[APPROVAL_REQUIRED: (.*?)\]\]").expect("constant regex pattern is valid")
});

/// Extract the description from the first approval marker in `text`.
pub fn extract_approval(text: &str) -> Option<&str> {
    APPROVAL_MARKER.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Render an approval marker for `description`.
pub fn approval_marker(description: &str) -> String {
    format!("[[APPROVAL_REQUIRED: {}]]", description)
}

#[cfg(test)]
#[path = "marker_tests.rs"]
mod tests;
