// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-agent transcript: an append/merge-only log of timestamped entries.
//!
//! Streamed output arrives as many small fragments. Consecutive fragments are
//! coalesced into the most recent `AgentOutput` entry so one logical response
//! stays one growing line, instead of one entry per fragment.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a transcript entry.
    pub struct EntryId("ent-");
}

/// Marker that prefixes the echo of an operator command.
pub const ECHO_MARKER: &str = ">";

/// Content of the note that replaces a cleared transcript.
pub const CLEARED_NOTE: &str = "logs cleared.";

/// Who produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntrySource {
    /// Echo of a command typed by the operator
    OperatorEcho,
    /// Streamed executor output
    AgentOutput,
    /// Error output from the agent
    AgentError,
    /// Notes written by the dashboard itself
    SystemNote,
}

crate::simple_display! {
    EntrySource {
        OperatorEcho => "operator-echo",
        AgentOutput => "agent-output",
        AgentError => "agent-error",
        SystemNote => "system-note",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

crate::simple_display! {
    Severity {
        Info => "info",
        Success => "success",
        Warning => "warning",
        Error => "error",
    }
}

/// One line (or growing block) of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub timestamp_ms: u64,
    pub content: String,
    pub source: EntrySource,
    pub severity: Severity,
}

impl TranscriptEntry {
    pub fn new(
        source: EntrySource,
        severity: Severity,
        content: impl Into<String>,
        timestamp_ms: u64,
    ) -> Self {
        Self { id: EntryId::new(), timestamp_ms, content: content.into(), source, severity }
    }

    /// Echo of an operator command, prefixed with [`ECHO_MARKER`].
    pub fn echo(command: &str, timestamp_ms: u64) -> Self {
        Self::new(
            EntrySource::OperatorEcho,
            Severity::Info,
            format!("{} {}", ECHO_MARKER, command),
            timestamp_ms,
        )
    }

    pub fn output(content: impl Into<String>, timestamp_ms: u64) -> Self {
        Self::new(EntrySource::AgentOutput, Severity::Info, content, timestamp_ms)
    }

    pub fn note(severity: Severity, content: impl Into<String>, timestamp_ms: u64) -> Self {
        Self::new(EntrySource::SystemNote, severity, content, timestamp_ms)
    }

    /// Whether streamed chunks may be appended to this entry in place.
    fn accepts_chunks(&self) -> bool {
        self.source == EntrySource::AgentOutput && !self.content.starts_with(ECHO_MARKER)
    }
}

/// Ordered, never-empty sequence of transcript entries.
///
/// Order is append order. Timestamps are clamped so they never decrease;
/// equal timestamps keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create a transcript holding a single seed entry.
    pub fn seeded(seed: TranscriptEntry) -> Self {
        Self { entries: vec![seed] }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }

    /// Add an entry at the end, without merging.
    pub fn append(&mut self, mut entry: TranscriptEntry) -> &TranscriptEntry {
        entry.timestamp_ms = self.clamp(entry.timestamp_ms);
        let idx = self.entries.len();
        self.entries.push(entry);
        &self.entries[idx]
    }

    /// Apply one streamed chunk.
    ///
    /// Concatenates onto the last entry when it is agent output that is not
    /// an operator echo; otherwise starts a new `AgentOutput` entry. The
    /// coalesced entry keeps its id.
    pub fn append_or_coalesce_chunk(&mut self, chunk: &str, now_ms: u64) -> &TranscriptEntry {
        let coalesce = self.entries.last().is_some_and(TranscriptEntry::accepts_chunks);
        if coalesce {
            let idx = self.entries.len() - 1;
            self.entries[idx].content.push_str(chunk);
            return &self.entries[idx];
        }
        self.append(TranscriptEntry::output(chunk, now_ms))
    }

    /// Discard all entries and reseed with a single "logs cleared." note.
    pub fn clear(&mut self, now_ms: u64) {
        let ts = self.clamp(now_ms);
        self.entries.clear();
        self.entries.push(TranscriptEntry::note(Severity::Info, CLEARED_NOTE, ts));
    }

    /// Render as plain text, one `[timestamp] SOURCE: content` line per entry.
    pub fn export(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "[{}] {}: {}",
                    crate::time_fmt::format_rfc3339(e.timestamp_ms),
                    e.source.to_string().to_uppercase(),
                    e.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn clamp(&self, ts: u64) -> u64 {
        self.entries.last().map_or(ts, |last| ts.max(last.timestamp_ms))
    }
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
