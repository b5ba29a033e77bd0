// src/run/mod.rs

//! Process supervision.
//!
//! This module owns the child test process for the duration of a run:
//! - [`supervisor`] drives the watch-run loop and its state machine.
//! - [`outcome`] classifies exit codes into pass/fail/interrupted.
//! - [`interrupt`] delivers the platform-appropriate interrupt to the child.
//! - [`hooks`] executes the user's lifecycle commands.

pub mod hooks;
pub mod interrupt;
pub mod outcome;
pub mod supervisor;

pub use hooks::run_hook;
pub use outcome::{RunOutcome, EXIT_INTERRUPTED, EXIT_NOTESTSCOLLECTED, EXIT_OK};
pub use supervisor::RunSupervisor;
