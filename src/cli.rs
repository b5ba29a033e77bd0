// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `testwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "testwatch",
    version,
    about = "Continuous test runner: re-run your test command on file changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Directories to watch (default: current directory).
    #[arg(value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,

    /// Ignore a directory from being watched (repeatable).
    #[arg(long, value_name = "DIR")]
    pub ignore: Vec<PathBuf>,

    /// Comma-separated list of file extensions that can trigger a re-run
    /// when changed (default: .py). Use --ext='*' to allow any file.
    #[arg(long, value_name = "EXTS")]
    pub ext: Option<String>,

    /// Load configuration from this file instead of `testwatch.toml`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Clear the screen before each run.
    #[arg(short = 'c', long)]
    pub clear: bool,

    /// Do not beep on failure.
    #[arg(short = 'n', long)]
    pub nobeep: bool,

    /// Wait for all tests to complete before re-running. Otherwise, tests
    /// are interrupted on filesystem events.
    #[arg(short = 'w', long)]
    pub wait: bool,

    /// Run an arbitrary command before tests are run.
    #[arg(long, value_name = "CMD")]
    pub beforerun: Option<String>,

    /// Run an arbitrary command on completion or interruption. The exit code
    /// of the test command is passed as an argument.
    #[arg(long, value_name = "CMD")]
    pub afterrun: Option<String>,

    /// Run an arbitrary command on pass.
    #[arg(long, value_name = "CMD")]
    pub onpass: Option<String>,

    /// Run an arbitrary command on failure.
    #[arg(long, value_name = "CMD")]
    pub onfail: Option<String>,

    /// Run an arbitrary command when a run is cut short by new changes.
    #[arg(long, value_name = "CMD")]
    pub oninterrupt: Option<String>,

    /// Run an arbitrary command when exiting testwatch.
    #[arg(long, value_name = "CMD")]
    pub onexit: Option<String>,

    /// Run a custom command instead of "pytest".
    #[arg(long, value_name = "CMD")]
    pub runner: Option<String>,

    /// Re-run after a delay (in milliseconds), allowing for more filesystem
    /// events to queue up (default: 200). Use 0 to disable.
    #[arg(long, value_name = "MS")]
    pub spool: Option<u64>,

    /// Use polling instead of OS events (useful in VMs).
    #[arg(short = 'p', long)]
    pub poll: bool,

    /// Increase verbosity of the output.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Decrease verbosity of the output (precedence over --verbose).
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TESTWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Extra arguments appended to the test command, after `--`.
    #[arg(last = true, value_name = "RUNNER_ARGS")]
    pub runner_args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
