// src/run/supervisor.rs

//! The watch-run control loop.
//!
//! One iteration: take a change batch, announce it, fire the before hook, run
//! the test command, classify its exit code, fire the after and
//! pass/fail/interrupt hooks, then wait for the next batch. A filesystem
//! event while the child is running interrupts it (unless `--wait`) and its
//! batch becomes the next run; a user Ctrl-C ends the loop instead.

use std::process::ExitStatus;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::process::{Child, Command};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::RunConfig;
use crate::run::hooks::run_hook;
use crate::run::interrupt;
use crate::run::outcome::RunOutcome;
use crate::summary;
use crate::watch::filter::ChangeRecord;
use crate::watch::spooler::EventSpooler;
use crate::watch::watcher::WatcherHandle;

/// How often the supervision loop checks the child and the event queue.
/// Interrupt latency is bounded by this interval.
const CHILD_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How a supervised run ended.
enum Supervision {
    /// The child exited on its own, or was interrupted by a filesystem event.
    Completed(i32),
    /// The user interrupted the supervisor itself; the code is the child's
    /// final exit code after its own Ctrl-C cleanup.
    UserInterrupted(i32),
}

#[derive(Debug, PartialEq, Eq)]
enum LoopState {
    Continue,
    Shutdown,
}

/// Owns the child test process and the consumer side of the event queue for
/// the lifetime of the watch loop.
pub struct RunSupervisor {
    config: RunConfig,
    spooler: EventSpooler,
    /// Kept so the native watches can be released before the exit hook runs.
    /// `None` in tests that drive the queue by hand.
    watcher: Option<WatcherHandle>,
    shutdown: watch::Receiver<bool>,
    /// Set just before a synthesized console interrupt on Windows, so the
    /// Ctrl-C listener can tell it apart from the user's.
    self_interrupt: Arc<AtomicBool>,
}

impl RunSupervisor {
    pub fn new(
        config: RunConfig,
        spooler: EventSpooler,
        watcher: Option<WatcherHandle>,
        shutdown: watch::Receiver<bool>,
        self_interrupt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            spooler,
            watcher,
            shutdown,
            self_interrupt,
        }
    }

    /// Drive the loop until the user interrupts, the watch layer goes away,
    /// or an iteration fails.
    ///
    /// Errors inside an iteration are not retried: a hook setup or path that
    /// fails once will fail every iteration, so the loop stops and shuts
    /// down cleanly instead.
    pub async fn run(mut self) -> Result<()> {
        // The very first run starts from a synthetic empty batch.
        let mut batch: Vec<ChangeRecord> = Vec::new();

        loop {
            let state = match self.run_once(&batch).await {
                Ok(state) => state,
                Err(err) => {
                    if self.config.verbose {
                        error!("stopping after error: {err:?}");
                    } else {
                        error!("stopping after error: {err}");
                    }
                    break;
                }
            };

            if state == LoopState::Shutdown {
                break;
            }

            batch = match self.next_batch().await {
                Some(batch) => batch,
                None => break,
            };
        }

        // Release the native watches before the exit hook runs.
        drop(self.watcher.take());
        run_hook(self.config.hooks.on_exit.as_deref(), &[]).await;
        info!("testwatch stopped");
        Ok(())
    }

    /// One full run: announce, before-hook, spawn, supervise, after-hook,
    /// classify, dispatch.
    async fn run_once(&mut self, batch: &[ChangeRecord]) -> Result<LoopState> {
        if self.config.auto_clear {
            summary::clear_screen().await;
        } else if !self.config.quiet {
            println!();
        }

        if !self.config.quiet {
            summary::show_summary(&self.config.command_line(), batch, self.config.verbose);
        }

        run_hook(self.config.hooks.before.as_deref(), &[]).await;

        let mut child = match self.spawn_runner() {
            Ok(child) => child,
            Err(err) => {
                // A missing runner must not kill the loop: report it as a
                // failed run so the next edit can retry with a fixed command.
                warn!(
                    command = %self.config.command_line(),
                    error = %err,
                    "failed to start test command"
                );
                self.dispatch_outcome(RunOutcome::Failed).await;
                return Ok(LoopState::Continue);
            }
        };

        match self.supervise(&mut child).await? {
            Supervision::Completed(code) => {
                run_hook(self.config.hooks.after.as_deref(), &[code.to_string()]).await;
                self.dispatch_outcome(RunOutcome::from_exit_code(code)).await;
                Ok(LoopState::Continue)
            }
            Supervision::UserInterrupted(code) => {
                info!("interrupted by user, shutting down");
                run_hook(self.config.hooks.after.as_deref(), &[code.to_string()]).await;
                Ok(LoopState::Shutdown)
            }
        }
    }

    fn spawn_runner(&self) -> Result<Child> {
        let (program, args) = self
            .config
            .command
            .split_first()
            .context("test command is empty")?;

        info!(command = %self.config.command_line(), "starting test command");
        Command::new(program)
            .args(args)
            .spawn()
            .with_context(|| format!("spawning test command '{}'", self.config.command_line()))
    }

    /// Poll the child until it exits, the user interrupts, or (outside wait
    /// mode) a new filesystem event preempts the run.
    async fn supervise(&mut self, child: &mut Child) -> Result<Supervision> {
        loop {
            if let Some(status) = child.try_wait().context("polling test command")? {
                return Ok(Supervision::Completed(exit_code_of(status)));
            }

            if *self.shutdown.borrow() {
                // The terminal delivered the user's Ctrl-C to the child as
                // well; let its cleanup finish and record the final code.
                let status = child
                    .wait()
                    .await
                    .context("waiting for interrupted test command")?;
                return Ok(Supervision::UserInterrupted(exit_code_of(status)));
            }

            if !self.config.wait_for_completion && self.spooler.has_pending() {
                info!("change detected during run, interrupting test command");
                if cfg!(windows) {
                    self.self_interrupt.store(true, Ordering::SeqCst);
                }
                interrupt::interrupt(child)?;
                let status = child
                    .wait()
                    .await
                    .context("waiting for interrupted test command")?;
                return Ok(Supervision::Completed(exit_code_of(status)));
            }

            sleep(CHILD_POLL_INTERVAL).await;
        }
    }

    async fn dispatch_outcome(&self, outcome: RunOutcome) {
        debug!(?outcome, "classified run outcome");
        match outcome {
            RunOutcome::Passed | RunOutcome::NoTestsCollected => {
                run_hook(self.config.hooks.on_pass.as_deref(), &[]).await;
            }
            RunOutcome::Interrupted => {
                run_hook(self.config.hooks.on_interrupt.as_deref(), &[]).await;
            }
            RunOutcome::Failed => {
                if self.config.beep_on_failure {
                    summary::beep();
                }
                run_hook(self.config.hooks.on_fail.as_deref(), &[]).await;
            }
        }
    }

    /// Wait for the next batch, or `None` on shutdown / a closed watch layer.
    ///
    /// Records retained while the previous run was in flight make this return
    /// immediately (modulo the cooldown window for stragglers).
    async fn next_batch(&mut self) -> Option<Vec<ChangeRecord>> {
        let cooldown = self.config.cooldown;
        let mut shutdown = self.shutdown.clone();

        tokio::select! {
            records = self.spooler.drain(cooldown) => {
                if records.is_empty() {
                    // Producer side closed; nothing will ever arrive again.
                    warn!("event source closed, shutting down");
                    None
                } else {
                    Some(records)
                }
            }
            _ = shutdown.wait_for(|stop| *stop) => None,
        }
    }
}

/// Exit code of a finished child.
///
/// A child killed by SIGINT before installing its own handler reports no
/// code; that still counts as an interrupted run.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if status.signal() == Some(libc::SIGINT) {
            return crate::run::outcome::EXIT_INTERRUPTED;
        }
    }

    -1
}
