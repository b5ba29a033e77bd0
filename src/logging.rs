// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `TESTWATCH_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`
//!
//! The run summary is printed directly to stdout by the supervisor; tracing
//! output is diagnostics only, so the default level stays out of the way.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level.map(level_of).unwrap_or_else(|| {
        std::env::var("TESTWATCH_LOG")
            .ok()
            .and_then(|s| parse_level(&s))
            .unwrap_or(Level::WARN)
    });

    fmt().with_max_level(level).with_target(true).init();

    Ok(())
}

fn level_of(lvl: LogLevel) -> Level {
    match lvl {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
