// src/errors.rs

//! Crate-wide error types and the process exit codes they map to.

use thiserror::Error;

/// Clean shutdown.
pub const EXIT_SUCCESS: i32 = 0;

/// Unexpected runtime failure.
pub const EXIT_FAILURE: i32 = 1;

/// Fatal configuration problem detected before watching begins.
pub const EXIT_CONFIG: i32 = 2;

/// Errors that make the configuration unusable.
///
/// These are reported once at startup and map to [`EXIT_CONFIG`]; the
/// supervisor never starts watching with a broken configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),
}

pub use anyhow::{Error, Result};
