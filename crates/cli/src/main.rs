// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fg: operator console for a supervised agent fleet

mod color;
mod config;
mod console;
mod env;
mod logging;
mod output;
mod table;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use console::Console;
use fg_adapters::SimulatedExecutor;
use fg_core::SystemClock;
use fg_engine::{Runtime, TelemetryFeeder};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fg", version, styles = color::styles())]
#[command(about = "Supervise a fleet of agents, approving their sensitive actions")]
struct Cli {
    /// Config file [default: <config dir>/fg/fg.toml, if present]
    #[arg(short, long, global = true, env = "FG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the operator console (default)
    Run(RunArgs),
    /// List the agent templates
    Templates,
    /// Validate the config and print the effective settings as JSON
    CheckConfig,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Start with an empty fleet instead of the configured bootstrap agents
    #[arg(long)]
    no_bootstrap: bool,

    /// Do not run the telemetry feeder
    #[arg(long)]
    no_telemetry: bool,
}

/// How long shutdown waits for blocking tasks.
///
/// A pending stdin read only returns on the next line, so it is abandoned.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

fn main() -> ExitCode {
    let cli = Cli::parse();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let result = runtime.block_on(run(cli));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (config, source) = Config::resolve(cli.config.as_deref())?;
    let config = config.with_env_overrides();
    config.validate()?;

    match cli.command.unwrap_or_else(|| Command::Run(RunArgs::default())) {
        Command::Run(args) => run_console(config, source, args).await,
        Command::Templates => {
            output::write_templates(&mut std::io::stdout().lock(), &config.templates)?;
            Ok(())
        }
        Command::CheckConfig => {
            match &source {
                Some(path) => eprintln!("config: {}", path.display()),
                None => eprintln!("config: built-in defaults"),
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn run_console(config: Config, source: Option<PathBuf>, args: RunArgs) -> Result<()> {
    let _guard = logging::init_logging(config.log_file.as_deref());
    if let Some(path) = &source {
        tracing::info!(path = %path.display(), "loaded config");
    }

    let executor = SimulatedExecutor::new(config.stream_delay());
    let runtime = Runtime::new(executor, SystemClock, config.runtime_config());
    if !args.no_bootstrap {
        for agent in &config.bootstrap {
            runtime
                .provision(agent.request(&config.ram_limit_mb))
                .with_context(|| format!("bootstrap agent {:?}", agent.name))?;
        }
    }

    let mut console = Console::new(runtime.clone(), std::io::stdout());
    let telemetry = if args.no_telemetry {
        None
    } else {
        let feeder = TelemetryFeeder::new(config.cpu_history_len);
        console = console.with_metrics(feeder.shared_metrics());
        Some(feeder.spawn(runtime.clone(), config.telemetry_interval()))
    };

    let interactive = std::io::stdin().is_terminal();
    if interactive {
        println!(
            "fg {}: {} agents online. Type `help` for commands.",
            env!("CARGO_PKG_VERSION"),
            runtime.agent_count()
        );
    }
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let result = console.run(input, interactive).await;

    if let Some(handle) = telemetry {
        handle.abort();
    }
    tracing::info!("console closed");
    result?;
    Ok(())
}
