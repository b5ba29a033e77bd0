// src/watch/spooler.rs

//! Debouncing of change records into batches.
//!
//! The watcher side pushes records into an unbounded channel as they arrive;
//! [`EventSpooler::drain`] blocks until at least one record exists and then
//! keeps collecting until the channel has stayed quiet for one full cooldown
//! interval. A cooldown of zero disables spooling entirely.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::debug;

use crate::watch::filter::{ChangeKind, ChangeRecord};

/// Consumer half of the change-record queue.
///
/// Records observed while the supervisor is busy (via [`has_pending`]) are
/// retained and become part of the next drained batch.
///
/// [`has_pending`]: EventSpooler::has_pending
pub struct EventSpooler {
    rx: mpsc::UnboundedReceiver<ChangeRecord>,
    pending: VecDeque<ChangeRecord>,
}

impl EventSpooler {
    pub fn new(rx: mpsc::UnboundedReceiver<ChangeRecord>) -> Self {
        Self {
            rx,
            pending: VecDeque::new(),
        }
    }

    /// Move everything currently sitting in the channel into `pending`.
    fn pump(&mut self) {
        while let Ok(record) = self.rx.try_recv() {
            self.pending.push_back(record);
        }
    }

    /// True if at least one record has been queued and not yet drained.
    ///
    /// Non-blocking; the supervisor's poll loop uses this to decide whether
    /// an in-flight run should be interrupted.
    pub fn has_pending(&mut self) -> bool {
        self.pump();
        !self.pending.is_empty()
    }

    /// Block until at least one record is available, then collect the burst.
    ///
    /// With a non-zero cooldown, the queue is re-checked after each cooldown
    /// sleep and the batch only closes once a full interval passes with no
    /// new records, so a rapid series of edits becomes a single batch. The
    /// returned batch is already reduced (see [`reduce_batch`]).
    ///
    /// An empty return means the producer side is gone and no further events
    /// will ever arrive.
    pub async fn drain(&mut self, cooldown: Duration) -> Vec<ChangeRecord> {
        self.pump();
        if self.pending.is_empty() {
            match self.rx.recv().await {
                Some(record) => self.pending.push_back(record),
                None => return Vec::new(),
            }
        }

        if cooldown.is_zero() {
            self.pump();
        } else {
            loop {
                sleep(cooldown).await;
                let before = self.pending.len();
                self.pump();
                if self.pending.len() == before {
                    break;
                }
            }
        }

        let batch: Vec<ChangeRecord> = self.pending.drain(..).collect();
        debug!(collected = batch.len(), "drained change batch");
        reduce_batch(batch)
    }
}

/// Collapse a raw burst into the distinct logical changes it represents.
///
/// - A Modified record is dropped when the same path also saw a Created or
///   Moved record in the batch (editors fire modify-after-create).
/// - Any record whose source is the destination of a Moved record in the
///   batch is dropped.
/// - Exact duplicate (kind, source_path) pairs keep the first occurrence.
///
/// Insertion order of the surviving records is preserved.
pub fn reduce_batch(records: Vec<ChangeRecord>) -> Vec<ChangeRecord> {
    let created_or_moved: HashSet<String> = records
        .iter()
        .filter(|r| matches!(r.kind, ChangeKind::Created | ChangeKind::Moved))
        .map(|r| r.source_path.clone())
        .collect();

    let move_dests: HashSet<String> = records
        .iter()
        .filter(|r| r.kind == ChangeKind::Moved)
        .filter_map(|r| r.dest_path.clone())
        .collect();

    let mut seen: HashSet<(ChangeKind, String)> = HashSet::new();
    let mut reduced = Vec::with_capacity(records.len());

    for record in records {
        if record.kind == ChangeKind::Modified && created_or_moved.contains(&record.source_path) {
            continue;
        }
        if move_dests.contains(&record.source_path) {
            continue;
        }
        if !seen.insert((record.kind, record.source_path.clone())) {
            continue;
        }
        reduced.push(record);
    }

    reduced
}
