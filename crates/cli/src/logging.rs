// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.
//!
//! Logs never go to stdout, which belongs to the console.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Default filter when logging to a file.
pub const FILE_DIRECTIVE: &str = "info";
/// Default filter when logging to stderr, which the operator is watching.
pub const STDERR_DIRECTIVE: &str = "warn";

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(log_file: Option<&Path>) -> &'static str {
    if log_file.is_some() {
        FILE_DIRECTIVE
    } else {
        STDERR_DIRECTIVE
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Keep the returned guard alive for the life of the process so buffered
/// file output is flushed.
pub fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let default = default_directive(log_file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    match log_file.and_then(|path| Some((path.parent()?, path.file_name()?))) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
            None
        }
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
