// src/summary.rs

//! Human-readable output around each run: the change summary, terminal
//! clearing, and the failure beep. Pure presentation over data the control
//! loop already computed.

use std::io::{self, Write};

use time::macros::format_description;
use time::OffsetDateTime;
use tokio::process::Command;
use tracing::debug;

use crate::watch::filter::ChangeRecord;

/// Print the reduced change batch, one line per distinct change, followed by
/// the exact command line about to be executed.
pub fn show_summary(command_line: &str, batch: &[ChangeRecord], verbose: bool) {
    let run_line = format!("[{}] Running: {}", timestamp(), command_line);

    if batch.is_empty() {
        println!("{run_line}");
        return;
    }

    let mut lines = Vec::new();
    if verbose {
        lines.push("Changes detected:".to_string());
        let width = batch
            .iter()
            .map(|r| r.kind.verbose_label().len())
            .max()
            .unwrap_or(0);
        for record in batch {
            lines.push(format!(
                "  {:width$} {}",
                record.kind.verbose_label(),
                render_paths(record)
            ));
        }
    } else {
        for record in batch {
            lines.push(format!(
                "{} detected: {}",
                record.kind.label(),
                render_paths(record)
            ));
        }
    }

    lines.push(String::new());
    lines.push(run_line);
    println!("{}", lines.join("\n"));
}

fn render_paths(record: &ChangeRecord) -> String {
    match &record.dest_path {
        Some(dest) => format!("{} -> {}", record.source_path, dest),
        None => record.source_path.clone(),
    }
}

fn timestamp() -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    // Local offset is unavailable once worker threads exist; UTC is fine.
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&format).unwrap_or_default()
}

/// Emit the terminal bell.
pub fn beep() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

/// Clear the terminal between runs (`--clear`).
pub async fn clear_screen() {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg("cls");
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg("clear");
        c
    };

    if let Err(err) = cmd.status().await {
        debug!(error = %err, "failed to clear terminal");
    }
}
