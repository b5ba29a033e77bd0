// src/run/hooks.rs

//! Lifecycle hook execution.
//!
//! Hooks are best-effort notifications: their exit status is discarded, and a
//! hook that cannot even start is logged rather than propagated, so a broken
//! hook never takes the supervisor down.

use tokio::process::Command;
use tracing::{debug, warn};

/// Run a hook command through the host shell, appending `extra_args` joined
/// by single spaces, and wait for it to finish. A `None` or empty command is
/// a no-op.
pub async fn run_hook(command: Option<&str>, extra_args: &[String]) {
    let Some(command) = command else { return };
    if command.trim().is_empty() {
        return;
    }

    let mut line = command.to_string();
    for arg in extra_args {
        line.push(' ');
        line.push_str(arg);
    }

    debug!(command = %line, "running hook");

    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&line);
        c
    };

    match cmd.status().await {
        Ok(status) => {
            debug!(command = %line, exit_code = status.code().unwrap_or(-1), "hook finished");
        }
        Err(err) => {
            warn!(command = %line, error = %err, "hook failed to start");
        }
    }
}
