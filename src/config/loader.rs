// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::model::FileConfig;

/// Name of the implicit configuration file looked up in the working
/// directory.
pub const DEFAULT_CONFIG_FILE: &str = "testwatch.toml";

/// Load the configuration file, if one applies.
///
/// With an explicit `--config` path, a missing or unreadable file is an
/// error. Without one, a missing `testwatch.toml` simply yields the defaults.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    match explicit {
        Some(path) => load_from_path(path),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                load_from_path(&path)
            } else {
                debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                Ok(FileConfig::default())
            }
        }
    }
}

/// Read and deserialize a configuration file from a given path.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<FileConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {:?}", path))?;

    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}
