// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use fg_core::{AgentStatusKind, EventCategory, Severity};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
    pub const GOOD: u8 = 108;
    pub const WARN: u8 = 179;
    pub const BAD: u8 = 167;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

const RESET: &str = "\x1b[0m";

/// Wrap `text` in a 256-color escape when `enabled`.
pub fn paint(enabled: bool, code: u8, text: &str) -> String {
    if enabled {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(should_colorize(), codes::HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(should_colorize(), codes::LITERAL, text)
}

pub fn context(text: &str) -> String {
    paint(should_colorize(), codes::CONTEXT, text)
}

pub fn muted(text: &str) -> String {
    paint(should_colorize(), codes::MUTED, text)
}

pub fn status_code(kind: AgentStatusKind) -> u8 {
    match kind {
        AgentStatusKind::Idle => codes::GOOD,
        AgentStatusKind::Running => codes::HEADER,
        AgentStatusKind::AwaitingApproval => codes::WARN,
        AgentStatusKind::Error => codes::BAD,
        AgentStatusKind::Offline => codes::MUTED,
    }
}

/// Color `text` by agent status. Padding must be applied before coloring.
pub fn status(kind: AgentStatusKind, text: &str) -> String {
    paint(should_colorize(), status_code(kind), text)
}

pub fn severity(severity: Severity, text: &str) -> String {
    let code = match severity {
        Severity::Info => return text.to_string(),
        Severity::Success => codes::GOOD,
        Severity::Warning => codes::WARN,
        Severity::Error => codes::BAD,
    };
    paint(should_colorize(), code, text)
}

pub fn category(category: EventCategory, text: &str) -> String {
    let code = match category {
        EventCategory::System => codes::CONTEXT,
        EventCategory::Network => codes::HEADER,
        EventCategory::Security => codes::WARN,
        EventCategory::Agent => codes::GOOD,
    };
    paint(should_colorize(), code, text)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
