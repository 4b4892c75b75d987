use kauri_core::RawRow;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::csv::{read_rows, FileRows};

/// Reads every file concurrently and merges their rows.
///
/// One blocking task runs per file and hands its rows back over a channel
/// sized to the file count. Rows are appended in completion order, so the
/// result order varies between runs. Files that fail to open or stop part
/// way are logged and contribute whatever was read before the failure.
///
/// With a `timeout`, files still outstanding when it elapses are logged and
/// left out; their blocking reads are not cancelled.
pub async fn read_files(paths: &[PathBuf], timeout: Option<Duration>) -> Vec<RawRow> {
    if paths.is_empty() {
        return Vec::new();
    }

    let (tx, mut rx) = mpsc::channel::<FileRows>(paths.len());
    for path in paths {
        let tx = tx.clone();
        let path = path.clone();
        tokio::task::spawn_blocking(move || {
            tracing::info!("Reading file {}", path.display());
            let file = read_rows(&path);
            if let Err(e) = tx.blocking_send(file) {
                tracing::debug!(
                    rows = e.0.rows.len(),
                    "Dropping result for {}, collector has stopped",
                    e.0.path.display()
                );
            }
        });
    }
    // Once every task has sent (or died), recv() yields None.
    drop(tx);

    let deadline = timeout.map(|t| Instant::now() + t);
    let mut outstanding: Vec<PathBuf> = paths.to_vec();
    let mut all_rows = Vec::new();

    loop {
        let next = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(next) => next,
                Err(_) => {
                    for path in &outstanding {
                        tracing::warn!("Timed out waiting for {}", path.display());
                    }
                    break;
                }
            },
            None => rx.recv().await,
        };

        let Some(file) = next else { break };
        if let Some(pos) = outstanding.iter().position(|p| *p == file.path) {
            outstanding.swap_remove(pos);
        }
        report(&file);
        all_rows.extend(file.rows);
    }

    if deadline.is_none() {
        for path in &outstanding {
            tracing::warn!("Reader for {} exited without a result", path.display());
        }
    }

    all_rows
}

fn report(file: &FileRows) {
    match &file.error {
        Some(e) => tracing::warn!(rows = file.rows.len(), "{e}"),
        None => tracing::info!(
            "Successfully read {} rows from {}",
            file.rows.len(),
            file.path.display()
        ),
    }
}
