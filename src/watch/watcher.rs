// src/watch/watcher.rs

use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::ExtensionFilter;
use crate::watch::filter::{classify, ChangeRecord};
use crate::watch::planner::WatchTarget;

/// Interval used by the polling backend (`--poll`).
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Handle keeping the underlying watcher alive.
///
/// Dropping this handle deregisters every watch and stops event delivery.
pub struct WatcherHandle {
    _inner: Box<dyn Watcher + Send + Sync>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Register the planned targets with the native watch layer and start
/// forwarding classified change records into `records_tx`.
///
/// The raw `notify` callback runs on the watcher's own thread and only
/// forwards events into a channel; a tokio task applies [`classify`] and
/// pushes the surviving records towards the spooler.
pub fn spawn_watcher(
    targets: &[WatchTarget],
    extensions: ExtensionFilter,
    use_polling: bool,
    records_tx: mpsc::UnboundedSender<ChangeRecord>,
) -> Result<WatcherHandle> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    // Called synchronously by notify whenever an event arrives.
    let handler = move |res: notify::Result<Event>| match res {
        Ok(event) => {
            // A send error means the receiver task is gone, which only
            // happens during shutdown.
            let _ = event_tx.send(event);
        }
        Err(err) => {
            eprintln!("testwatch: file watch error: {err}");
        }
    };

    let mut watcher: Box<dyn Watcher + Send + Sync> = if use_polling {
        let config = Config::default().with_poll_interval(POLL_INTERVAL);
        Box::new(PollWatcher::new(handler, config)?)
    } else {
        Box::new(RecommendedWatcher::new(handler, Config::default())?)
    };

    for target in targets {
        let mode = if target.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(&target.path, mode)?;
        info!(
            path = %target.path.display(),
            recursive = target.recursive,
            "watching directory"
        );
    }

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");
            if let Some(record) = classify(&event, &extensions) {
                debug!(?record, "change record queued");
                if records_tx.send(record).is_err() {
                    // Supervisor is gone; stop forwarding.
                    return;
                }
            }
        }
        debug!("watcher forwarding loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}
