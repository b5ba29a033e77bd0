// src/watch/filter.rs

//! Classification of raw `notify` events into canonical change records.
//!
//! This is the only module that looks at `notify`'s event taxonomy; everything
//! downstream of it works with the closed [`ChangeKind`] enum.

use std::env;
use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};

use crate::config::ExtensionFilter;

/// The four kinds of change the supervisor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Modified,
    Moved,
    Deleted,
}

impl ChangeKind {
    /// Short label used in run summaries ("Change detected: ...").
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Created => "New file",
            ChangeKind::Modified => "Change",
            ChangeKind::Moved => "Move",
            ChangeKind::Deleted => "Deletion",
        }
    }

    /// Column label used in verbose run summaries.
    pub fn verbose_label(self) -> &'static str {
        match self {
            ChangeKind::Created => "Created:",
            ChangeKind::Modified => "Modified:",
            ChangeKind::Moved => "Moved:",
            ChangeKind::Deleted => "Deleted:",
        }
    }
}

/// One canonical change, with paths made relative to the working directory
/// where possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub source_path: String,
    /// Destination, present only for [`ChangeKind::Moved`].
    pub dest_path: Option<String>,
}

/// Decide whether a raw notification is relevant, and normalise it.
///
/// Returns `None` for event kinds outside the four watched ones, for
/// directory events, and for files whose extension (source or move
/// destination) is filtered out. A move only needs to match on one side, so a
/// rename from an ignored type into a watched one is still observed.
pub fn classify(event: &Event, extensions: &ExtensionFilter) -> Option<ChangeRecord> {
    let (kind, src, dest) = match &event.kind {
        EventKind::Create(CreateKind::Folder) => return None,
        EventKind::Create(_) => (ChangeKind::Created, event.paths.first()?, None),

        EventKind::Remove(RemoveKind::Folder) => return None,
        EventKind::Remove(_) => (ChangeKind::Deleted, event.paths.first()?, None),

        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            (ChangeKind::Moved, event.paths.first()?, event.paths.get(1))
        }
        // Halves of a rename whose counterpart is unknown: report them as a
        // deletion/creation so the edit is still observed.
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            (ChangeKind::Deleted, event.paths.first()?, None)
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            (ChangeKind::Created, event.paths.first()?, None)
        }

        // Metadata-only churn (permissions, timestamps) is not a content change.
        EventKind::Modify(ModifyKind::Metadata(_)) => return None,
        EventKind::Modify(_) => (ChangeKind::Modified, event.paths.first()?, None),

        _ => return None,
    };

    // The kinds above distinguish files from folders for create/remove;
    // modify events need a filesystem check.
    if src.is_dir() {
        return None;
    }

    let src_included = extensions.matches(src);
    let dest_included = dest.map(|d| extensions.matches(d)).unwrap_or(false);
    if !src_included && !dest_included {
        return None;
    }

    Some(ChangeRecord {
        kind,
        source_path: relative_display(src),
        dest_path: dest.map(|d| relative_display(d)),
    })
}

/// Render a path relative to the current working directory. Falls back to the
/// path as given when it is not underneath it; presentation must never fail
/// the pipeline.
fn relative_display(path: &Path) -> String {
    env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}
