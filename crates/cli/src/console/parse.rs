// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console line parsing.
//!
//! Names and templates may contain spaces. They can be quoted, or left bare
//! and matched greedily against what exists (see [`Args::split_prefix`]).

use fg_core::Priority;
use fg_engine::ViewFilter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    BadFilter(String),
    #[error("{0}")]
    BadOption(String),
    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// One whitespace-separated word, with its byte offset in the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub start: usize,
}

/// Arguments following the command word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    line: String,
    words: Vec<Word>,
}

impl Args {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.text.as_str())
    }

    /// All words joined by single spaces, quotes removed.
    pub fn joined(&self) -> String {
        self.words().collect::<Vec<_>>().join(" ")
    }

    /// The line from the first word onward, exactly as typed.
    pub fn raw(&self) -> &str {
        match self.words.first() {
            Some(w) => self.line[w.start..].trim_end(),
            None => "",
        }
    }

    /// Match the longest run of leading words that `accept` recognizes.
    ///
    /// Returns the accepted value and the remaining arguments.
    pub fn split_prefix<T>(&self, mut accept: impl FnMut(&str) -> Option<T>) -> Option<(T, Args)> {
        (1..=self.words.len()).rev().find_map(|n| {
            let key = self.words[..n].iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
            accept(&key).map(|value| {
                (value, Args { line: self.line.clone(), words: self.words[n..].to_vec() })
            })
        })
    }
}

/// `new` arguments with the resource options taken out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub args: Args,
    pub ram_limit_mb: Option<u32>,
    pub priority: Option<Priority>,
}

impl NewAgent {
    const USAGE: &'static str =
        "new <template> <name...> [--ram <mb>] [--priority low|normal|high]";

    fn parse(args: Args) -> Result<Self, ParseError> {
        let mut words = Vec::with_capacity(args.words.len());
        let mut ram_limit_mb = None;
        let mut priority = None;
        let mut iter = args.words.into_iter();
        while let Some(word) = iter.next() {
            match word.text.as_str() {
                "--ram" => {
                    let value = iter.next().ok_or(ParseError::Usage(Self::USAGE))?;
                    let mb = value.text.parse().map_err(|_| {
                        ParseError::BadOption(format!("invalid --ram value: {}", value.text))
                    })?;
                    ram_limit_mb = Some(mb);
                }
                "--priority" => {
                    let value = iter.next().ok_or(ParseError::Usage(Self::USAGE))?;
                    priority = Some(value.text.parse().map_err(ParseError::BadOption)?);
                }
                _ => words.push(word),
            }
        }
        if words.is_empty() {
            return Err(ParseError::Usage(Self::USAGE));
        }
        Ok(Self { args: Args { line: args.line, words }, ram_limit_mb, priority })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `new <template> <name...> [--ram <mb>] [--priority <p>]`
    New(NewAgent),
    /// `ls [all|devops|security]`
    List(ViewFilter),
    /// `send <agent> <command...>`
    Send(Args),
    Approve(Args),
    Deny(Args),
    Show(Args),
    Export(Args),
    Clear(Args),
    Reset(Args),
    Events,
    Stats,
    Wait,
    Help,
    Quit,
    /// Blank line or `#` comment
    Empty,
}

pub const HELP: &str = "\
Commands:
  new <template> <name...>      Provision an agent
      [--ram <mb>] [--priority low|normal|high]
  ls [all|devops|security]      List agents
  send <agent> <command...>     Send a command (runs in the background)
  approve <agent>               Approve the pending action
  deny <agent>                  Deny the pending action
  show <agent>                  Show status and transcript
  export <agent>                Print the transcript as plain text
  clear <agent>                 Clear the transcript
  reset <agent>                 Reset the executor session
  events                        Recent fleet events
  stats                         Fleet and host metrics
  wait                          Wait for running sessions to finish
  help                          Show this help
  quit                          Exit

Agents are addressed by id, unique id prefix, or exact name.
Quote names that contain spaces, e.g. send \"Main Console\" ls
";

pub fn parse(line: &str) -> Result<ConsoleCommand, ParseError> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(ConsoleCommand::Empty);
    }
    let mut words = tokenize(line)?;
    if words.is_empty() {
        return Ok(ConsoleCommand::Empty);
    }
    let verb = words.remove(0).text.to_ascii_lowercase();
    let args = Args { line: line.to_string(), words };

    let need = |usage: &'static str| {
        if args.is_empty() {
            Err(ParseError::Usage(usage))
        } else {
            Ok(args.clone())
        }
    };

    Ok(match verb.as_str() {
        "new" => ConsoleCommand::New(NewAgent::parse(need(NewAgent::USAGE)?)?),
        "ls" | "list" => {
            let filter = if args.is_empty() {
                ViewFilter::All
            } else {
                args.joined().parse().map_err(ParseError::BadFilter)?
            };
            ConsoleCommand::List(filter)
        }
        "send" => ConsoleCommand::Send(need("send <agent> <command...>")?),
        "approve" => ConsoleCommand::Approve(need("approve <agent>")?),
        "deny" => ConsoleCommand::Deny(need("deny <agent>")?),
        "show" => ConsoleCommand::Show(need("show <agent>")?),
        "export" => ConsoleCommand::Export(need("export <agent>")?),
        "clear" => ConsoleCommand::Clear(need("clear <agent>")?),
        "reset" => ConsoleCommand::Reset(need("reset <agent>")?),
        "events" => ConsoleCommand::Events,
        "stats" => ConsoleCommand::Stats,
        "wait" => ConsoleCommand::Wait,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => return Err(ParseError::UnknownCommand(verb)),
    })
}

/// Split on whitespace; double quotes group words and are removed.
fn tokenize(line: &str) -> Result<Vec<Word>, ParseError> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;
    let mut quoted = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => {
                quoted = !quoted;
                current.get_or_insert_with(|| Word { text: String::new(), start: i });
            }
            c if c.is_whitespace() && !quoted => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            c => current.get_or_insert_with(|| Word { text: String::new(), start: i }).text.push(c),
        }
    }
    if quoted {
        return Err(ParseError::UnterminatedQuote);
    }
    words.extend(current);
    Ok(words)
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
