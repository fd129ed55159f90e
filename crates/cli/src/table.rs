// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Column-aligned text tables.

use crate::color;
use fg_core::AgentStatusKind;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Muted,
    Status,
}

#[derive(Debug, Clone)]
pub struct Column {
    name: &'static str,
    align: Align,
    style: Style,
    max: Option<usize>,
}

impl Column {
    pub fn left(name: &'static str) -> Self {
        Self { name, align: Align::Left, style: Style::Plain, max: None }
    }

    pub fn right(name: &'static str) -> Self {
        Self { align: Align::Right, ..Self::left(name) }
    }

    pub fn muted(name: &'static str) -> Self {
        Self { style: Style::Muted, ..Self::left(name) }
    }

    /// Cells are status labels and are colored by status.
    pub fn status(name: &'static str) -> Self {
        Self { style: Style::Status, ..Self::left(name) }
    }

    /// Truncate cells to at most `max` characters.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        let cells = cells
            .into_iter()
            .zip(&self.columns)
            .map(|(cell, col)| match col.max {
                Some(max) if cell.chars().count() > max => cell.chars().take(max).collect(),
                _ => cell,
            })
            .collect();
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(col.name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        let widths = self.widths();
        let last = self.columns.len().saturating_sub(1);

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (col, &w))| color::header(&pad(col.name, w, col.align, i == last)))
            .collect();
        writeln!(out, "{}", header.join("  "))?;

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (col, &w))| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    let padded = pad(cell, w, col.align, i == last);
                    match col.style {
                        Style::Plain => padded,
                        Style::Muted => color::muted(&padded),
                        Style::Status => match status_kind(cell) {
                            Some(kind) => color::status(kind, &padded),
                            None => padded,
                        },
                    }
                })
                .collect();
            writeln!(out, "{}", cells.join("  "))?;
        }
        Ok(())
    }
}

fn pad(text: &str, width: usize, align: Align, last: bool) -> String {
    match align {
        Align::Left if last => text.to_string(),
        Align::Left => format!("{:<width$}", text, width = width),
        Align::Right => format!("{:>width$}", text, width = width),
    }
}

fn status_kind(label: &str) -> Option<AgentStatusKind> {
    AgentStatusKind::ALL.into_iter().find(|k| k.label() == label)
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
