// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented operator console.
//!
//! Commands that stream (`send`, `approve`, `deny`) run as background tasks
//! so the operator can keep supervising other agents meanwhile. A notice is
//! printed when each one finishes.

mod parse;

use parse::{parse, Args, ConsoleCommand, NewAgent, HELP};

use crate::output;
use fg_adapters::CommandExecutor;
use fg_core::{AgentId, Clock, ProvisionRequest, Verdict};
use fg_engine::{CommandSession, Runtime, SessionOutcome, SystemMetrics};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinSet};

/// Number of events shown by `events`.
const EVENTS_SHOWN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct Finished {
    name: String,
    outcome: SessionOutcome,
}

pub struct Console<E, C: Clock, W> {
    runtime: Runtime<E, C>,
    metrics: Option<Arc<Mutex<SystemMetrics>>>,
    sessions: JoinSet<Finished>,
    out: W,
}

impl<E, C, W> Console<E, C, W>
where
    E: CommandExecutor,
    C: Clock,
    W: Write,
{
    pub fn new(runtime: Runtime<E, C>, out: W) -> Self {
        Self { runtime, metrics: None, sessions: JoinSet::new(), out }
    }

    /// Show host metrics from a running telemetry feeder in `stats`.
    pub fn with_metrics(mut self, metrics: Arc<Mutex<SystemMetrics>>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Background sessions not yet reported.
    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.sessions.len()
    }

    /// Read and execute lines until `quit` or end of input, then wait for
    /// the sessions still streaming.
    pub async fn run<R>(&mut self, input: R, prompt: bool) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, "fg> ")?;
                self.out.flush()?;
            }
            let line = loop {
                tokio::select! {
                    line = lines.next_line() => break line?,
                    Some(done) = self.sessions.join_next(), if !self.sessions.is_empty() => {
                        self.report(done)?;
                    }
                }
            };
            let Some(line) = line else {
                break;
            };
            if self.execute(&line).await? == Flow::Quit {
                break;
            }
        }
        self.wait().await
    }

    /// Parse and execute one console line.
    pub async fn execute(&mut self, line: &str) -> io::Result<Flow> {
        tracing::debug!(line, "console command");
        match parse(line) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => {
                writeln!(self.out, "error: {}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Block until every background session has finished.
    pub async fn wait(&mut self) -> io::Result<()> {
        while let Some(done) = self.sessions.join_next().await {
            self.report(done)?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, command: ConsoleCommand) -> io::Result<Flow> {
        match command {
            ConsoleCommand::Empty => {}
            ConsoleCommand::New(new) => self.provision(&new)?,
            ConsoleCommand::List(filter) => {
                let records = self.runtime.view(filter);
                output::write_agents(&mut self.out, &records)?;
            }
            ConsoleCommand::Send(args) => self.send(&args)?,
            ConsoleCommand::Approve(args) => self.decide(&args, Verdict::Approved)?,
            ConsoleCommand::Deny(args) => self.decide(&args, Verdict::Denied)?,
            ConsoleCommand::Show(args) => {
                if let Some(record) = self.target(&args)?.and_then(|id| self.runtime.get(&id)) {
                    let now = self.runtime.clock().epoch_ms();
                    output::write_agent(&mut self.out, &record, now)?;
                }
            }
            ConsoleCommand::Export(args) => {
                if let Some(id) = self.target(&args)? {
                    match self.runtime.export(&id) {
                        Ok(text) => writeln!(self.out, "{}", text.trim_end_matches('\n'))?,
                        Err(e) => writeln!(self.out, "error: {}", e)?,
                    }
                }
            }
            ConsoleCommand::Clear(args) => {
                if let Some(id) = self.target(&args)? {
                    match self.runtime.clear(&id) {
                        Ok(()) => writeln!(self.out, "Cleared transcript of {}", self.name(&id))?,
                        Err(e) => writeln!(self.out, "error: {}", e)?,
                    }
                }
            }
            ConsoleCommand::Reset(args) => {
                if let Some(id) = self.target(&args)? {
                    match self.runtime.reset(&id).await {
                        Ok(()) => writeln!(self.out, "Reset session of {}", self.name(&id))?,
                        Err(e) => writeln!(self.out, "error: {}", e)?,
                    }
                }
            }
            ConsoleCommand::Events => {
                let events = self.runtime.recent_events(EVENTS_SHOWN);
                output::write_events(&mut self.out, &events)?;
            }
            ConsoleCommand::Stats => {
                let summary = self.runtime.summary();
                let metrics = self.metrics.as_ref().map(|m| m.lock().clone());
                output::write_stats(&mut self.out, &summary, metrics.as_ref())?;
            }
            ConsoleCommand::Wait => self.wait().await?,
            ConsoleCommand::Help => write!(self.out, "{}", HELP)?,
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn provision(&mut self, new: &NewAgent) -> io::Result<()> {
        let config = self.runtime.config();
        let Some((template, rest)) =
            new.args.split_prefix(|key| config.catalog.find(key).map(|t| t.name.clone()))
        else {
            let known = config.catalog.names().join(", ");
            let key = new.args.joined();
            return writeln!(self.out, "error: no template matches {:?} (known: {})", key, known);
        };
        let name = rest.joined();
        let ram = new.ram_limit_mb.unwrap_or_else(|| config.ram_limits.default_limit());
        let request = ProvisionRequest::new(&name, &template)
            .ram_limit_mb(ram)
            .priority(new.priority.unwrap_or_default());
        match self.runtime.provision(request) {
            Ok(id) => writeln!(
                self.out,
                "Provisioned {} ({}) [{}]",
                name,
                id.short(output::SHORT_ID),
                template
            ),
            Err(e) => writeln!(self.out, "error: {}", e),
        }
    }

    fn send(&mut self, args: &Args) -> io::Result<()> {
        let Some((id, rest)) = args.split_prefix(|key| self.runtime.resolve(key)) else {
            return writeln!(self.out, "error: no agent matches {:?}", args.joined());
        };
        match self.runtime.begin(&id, rest.raw()) {
            Ok(session) => self.spawn(session),
            Err(e) => writeln!(self.out, "error: {}", e)?,
        }
        Ok(())
    }

    fn decide(&mut self, args: &Args, verdict: Verdict) -> io::Result<()> {
        let Some(id) = self.target(args)? else {
            return Ok(());
        };
        match self.runtime.decide(&id, verdict) {
            Ok(session) => {
                writeln!(self.out, "[{}] {}", self.name(&id), verdict)?;
                self.spawn(session);
            }
            Err(e) => writeln!(self.out, "error: {}", e)?,
        }
        Ok(())
    }

    fn spawn(&mut self, session: CommandSession<E, C>) {
        let name = self.name(session.agent_id());
        self.sessions.spawn(async move { Finished { name, outcome: session.run().await } });
    }

    /// Resolve the whole argument list to one agent, reporting a miss.
    fn target(&mut self, args: &Args) -> io::Result<Option<AgentId>> {
        let key = args.joined();
        let id = self.runtime.resolve(&key);
        if id.is_none() {
            writeln!(self.out, "error: no agent matches {:?}", key)?;
        }
        Ok(id)
    }

    fn name(&self, id: &AgentId) -> String {
        self.runtime.get(id).map(|r| r.name).unwrap_or_else(|| id.to_string())
    }

    fn report(&mut self, done: Result<Finished, JoinError>) -> io::Result<()> {
        match done {
            Ok(finished) => {
                writeln!(self.out, "{}", output::describe_outcome(&finished.name, &finished.outcome))
            }
            Err(e) => {
                tracing::error!(error = %e, "console session task failed");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
