// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering for console responses.

use crate::color;
use crate::table::{Column, Table};
use fg_core::{
    format_clock, format_elapsed_ms, AgentRecord, AgentStatusKind, EntrySource, GlobalEvent,
    TemplateCatalog, TranscriptEntry,
};
use fg_engine::{FleetSummary, SessionOutcome, SystemMetrics};
use std::io::{self, Write};

/// Characters of the id suffix shown in tables and notices.
pub const SHORT_ID: usize = 8;

pub fn write_agents(out: &mut impl Write, records: &[AgentRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No agents found");
    }
    let mut table = Table::new(vec![
        Column::muted("ID").with_max(SHORT_ID),
        Column::left("NAME"),
        Column::left("TEMPLATE"),
        Column::status("STATUS"),
        Column::right("CPU"),
        Column::right("RAM"),
        Column::left("PENDING").with_max(40),
    ]);
    for r in records {
        table.row(vec![
            r.id.short(SHORT_ID).to_string(),
            r.name.clone(),
            r.template.clone(),
            r.status.kind().label().to_string(),
            format!("{}%", r.resource_usage.cpu_percent),
            format!("{}/{}MB", r.resource_usage.ram_mb, r.config.ram_limit_mb),
            r.pending_action().unwrap_or("-").to_string(),
        ]);
    }
    table.render(out)
}

/// Agent header followed by its full transcript.
pub fn write_agent(out: &mut impl Write, record: &AgentRecord, now_ms: u64) -> io::Result<()> {
    let kind = record.status.kind();
    writeln!(out, "{} {} ({})", color::header("Agent:"), record.name, record.id)?;
    writeln!(out, "  {} {}", color::context("Template:"), record.template)?;
    writeln!(out, "  {} {}", color::context("Status:"), color::status(kind, kind.label()))?;
    if let Some(action) = record.pending_action() {
        writeln!(out, "  {} {}", color::context("Pending:"), action)?;
    }
    writeln!(
        out,
        "  {} {}MB, {} priority",
        color::context("Limits:"),
        record.config.ram_limit_mb,
        record.config.priority
    )?;
    writeln!(
        out,
        "  {} {}",
        color::context("Uptime:"),
        format_elapsed_ms(record.uptime_ms(now_ms))
    )?;
    if !record.decisions.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", color::header("Decisions:"))?;
        for d in &record.decisions {
            writeln!(
                out,
                "    {} {:<8} {} (held {})",
                format_clock(d.decided_at_ms),
                d.verdict.to_string(),
                d.action,
                format_elapsed_ms(d.wait_ms())
            )?;
        }
    }
    writeln!(out)?;
    for entry in record.transcript.iter() {
        write_entry(out, entry)?;
    }
    Ok(())
}

/// One transcript entry. Continuation lines are indented under the first.
pub fn write_entry(out: &mut impl Write, entry: &TranscriptEntry) -> io::Result<()> {
    let stamp = color::muted(&format_clock(entry.timestamp_ms));
    let content = entry.content.trim_end_matches('\n');
    for (i, line) in content.split('\n').enumerate() {
        let line = match entry.source {
            EntrySource::OperatorEcho => color::literal(line),
            EntrySource::AgentOutput => line.to_string(),
            EntrySource::AgentError | EntrySource::SystemNote => {
                color::severity(entry.severity, line)
            }
        };
        if i == 0 {
            writeln!(out, "{}  {}", stamp, line)?;
        } else {
            writeln!(out, "{:width$}  {}", "", line, width = 8)?;
        }
    }
    Ok(())
}

pub fn write_events(out: &mut impl Write, events: &[GlobalEvent]) -> io::Result<()> {
    if events.is_empty() {
        return writeln!(out, "No events");
    }
    for e in events {
        writeln!(
            out,
            "{}  {}  {}",
            color::muted(&format_clock(e.timestamp_ms)),
            color::category(e.category, &format!("{:<8}", e.category.to_string())),
            e.message
        )?;
    }
    Ok(())
}

pub fn write_stats(
    out: &mut impl Write,
    summary: &FleetSummary,
    metrics: Option<&SystemMetrics>,
) -> io::Result<()> {
    writeln!(
        out,
        "{} {} total, {} idle, {} active, {} waiting, {} error, {} offline",
        color::header("Agents:"),
        summary.total,
        summary.idle,
        summary.running,
        summary.awaiting_approval,
        summary.error,
        summary.offline
    )?;
    let Some(metrics) = metrics else {
        return Ok(());
    };
    let cpu = match metrics.latest_cpu() {
        Some(cpu) => format!("{}%", cpu),
        None => "-".to_string(),
    };
    writeln!(out, "{} {} ({} samples)", color::header("CPU:"), cpu, metrics.cpu_history.len())?;
    writeln!(
        out,
        "{} up {}kb/s, down {}kb/s, latency {}ms",
        color::header("Network:"),
        metrics.network.up_kbps,
        metrics.network.down_kbps,
        metrics.network.latency_ms
    )
}

pub fn write_templates(out: &mut impl Write, catalog: &TemplateCatalog) -> io::Result<()> {
    let mut table = Table::new(vec![Column::left("TEMPLATE"), Column::left("DESCRIPTION")]);
    for t in catalog.iter() {
        table.row(vec![t.name.clone(), t.description.clone()]);
    }
    table.render(out)
}

/// One-line notice for a finished background session.
pub fn describe_outcome(name: &str, outcome: &SessionOutcome) -> String {
    match outcome {
        SessionOutcome::Completed => format!("[{}] done", name),
        SessionOutcome::AwaitingApproval(action) => {
            let label = color::status(AgentStatusKind::AwaitingApproval, "approval required:");
            format!("[{}] {} {}", name, label, action)
        }
        SessionOutcome::StreamError(message) => format!("[{}] error: {}", name, message),
        SessionOutcome::Failed(err) => format!("[{}] failed: {}", name, err),
        SessionOutcome::TimedOut(after) => {
            format!("[{}] timed out after {}", name, format_elapsed_ms(after.as_millis() as u64))
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
