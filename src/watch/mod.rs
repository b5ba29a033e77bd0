// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Mapping raw `notify` events to canonical change records (`filter`).
//! - Debouncing bursts of records into batches (`spooler`).
//! - Planning which directories to register, and how, so that ignored
//!   subtrees are never scanned (`planner`).
//! - Wiring up the cross-platform filesystem watcher itself (`watcher`).
//!
//! It does **not** know about the test command or hooks; it only turns
//! filesystem changes into batches for the run supervisor.

pub mod filter;
pub mod planner;
pub mod spooler;
pub mod watcher;

pub use filter::{classify, ChangeKind, ChangeRecord};
pub use planner::{plan_targets, same_path, WatchTarget};
pub use spooler::{reduce_batch, EventSpooler};
pub use watcher::{spawn_watcher, WatcherHandle};
