// src/watch/planner.rs

//! Startup planning of the watch registrations, given an ignore list.
//!
//! Matching is deliberately shallow: ignore entries are compared against the
//! immediate subdirectories of each root only. An ignore entry nested deeper
//! than one level is not matched, and the root stays a recursive watch.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// A directory to register with the native watch layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub recursive: bool,
}

/// Partition watch roots into recursive and non-recursive registrations so
/// that ignored subtrees are never scanned.
///
/// - Empty ignore list: every root is watched recursively.
/// - A root with no ignored children: watched recursively.
/// - A root with ignored children: the root itself is watched non-recursively
///   (its direct file contents still count) and each kept child becomes its
///   own recursive target.
///
/// The result is sorted and deduplicated, so planning is idempotent.
pub fn plan_targets(roots: &[PathBuf], ignore: &[PathBuf]) -> Result<Vec<WatchTarget>> {
    let mut targets = Vec::new();

    if ignore.is_empty() {
        targets.extend(roots.iter().map(|root| WatchTarget {
            path: root.clone(),
            recursive: true,
        }));
        targets.sort();
        targets.dedup();
        return Ok(targets);
    }

    for root in roots {
        let subdirs = immediate_subdirs(root)?;
        let kept: Vec<PathBuf> = subdirs
            .iter()
            .filter(|sub| !ignore.iter().any(|ig| same_path(&root.join(ig), sub)))
            .cloned()
            .collect();

        if kept.len() == subdirs.len() {
            targets.push(WatchTarget {
                path: root.clone(),
                recursive: true,
            });
        } else {
            debug!(
                root = %root.display(),
                ignored = subdirs.len() - kept.len(),
                "root has ignored children, splitting watch registrations"
            );
            targets.push(WatchTarget {
                path: root.clone(),
                recursive: false,
            });
            targets.extend(kept.into_iter().map(|path| WatchTarget {
                path,
                recursive: true,
            }));
        }
    }

    targets.sort();
    targets.dedup();
    Ok(targets)
}

fn immediate_subdirs(root: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("listing directory {:?}", root))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading an entry of {:?}", root))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            dirs.push(entry.path());
        }
    }
    Ok(dirs)
}

/// Path equality for ignore matching: absolute form, lexically cleaned, and
/// case-folded where the host filesystem is case-insensitive.
pub fn same_path(left: &Path, right: &Path) -> bool {
    normalize(left) == normalize(right)
}

fn normalize(path: &Path) -> PathBuf {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut cleaned = PathBuf::new();
    for comp in abs.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }

    if cfg!(windows) {
        PathBuf::from(cleaned.to_string_lossy().to_lowercase())
    } else {
        cleaned
    }
}
