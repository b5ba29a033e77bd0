// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod run;
pub mod summary;
pub mod watch;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::sync::watch as signal;
use tracing::{error, info};

use crate::cli::CliArgs;
use crate::config::{loader, RunConfig};
use crate::errors::{ConfigError, EXIT_SUCCESS};
use crate::run::RunSupervisor;
use crate::watch::{plan_targets, spawn_watcher, EventSpooler};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config file loading and CLI merging
/// - the watch planner and the filesystem watcher
/// - Ctrl-C handling
/// - the run supervisor
///
/// Returns the process exit code for a clean shutdown.
pub async fn run(args: CliArgs) -> Result<i32> {
    let file_cfg = loader::load(args.config.as_deref())?;
    let cfg = RunConfig::resolve(&args, file_cfg);

    // A missing watch root is a fatal configuration error, reported before
    // any watching starts.
    for dir in &cfg.directories {
        if !dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound(dir.display().to_string()).into());
        }
    }

    let targets = plan_targets(&cfg.directories, &cfg.ignore)?;
    info!(targets = targets.len(), "planned watch registrations");

    let (records_tx, records_rx) = mpsc::unbounded_channel();
    let watcher = spawn_watcher(&targets, cfg.extensions.clone(), cfg.use_polling, records_tx)?;

    // Ctrl-C → graceful shutdown. On Windows an event-triggered child
    // interrupt is broadcast to the whole console; `self_interrupt` lets the
    // listener skip that one synthesized event.
    let (shutdown_tx, shutdown_rx) = signal::channel(false);
    let self_interrupt = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&self_interrupt);
        tokio::spawn(async move {
            loop {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    error!("failed to listen for Ctrl-C: {err}");
                    return;
                }
                if flag.swap(false, Ordering::SeqCst) {
                    continue;
                }
                let _ = shutdown_tx.send(true);
                return;
            }
        });
    }

    let spooler = EventSpooler::new(records_rx);
    let supervisor = RunSupervisor::new(cfg, spooler, Some(watcher), shutdown_rx, self_interrupt);
    supervisor.run().await?;

    Ok(EXIT_SUCCESS)
}
