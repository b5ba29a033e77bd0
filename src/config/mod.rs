// src/config/mod.rs

//! Configuration for testwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed file model and the resolved [`RunConfig`]
//!   (`model.rs`).
//! - Load `testwatch.toml` (or the `--config` path) from disk (`loader.rs`).
//!
//! CLI arguments always take precedence over file values; the merge lives in
//! [`RunConfig::resolve`].

pub mod loader;
pub mod model;

pub use loader::{load, load_from_path};
pub use model::{ExtensionFilter, FileConfig, HookSet, RunConfig};
