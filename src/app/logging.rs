//! Progress logging utilities.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::LOGGING_INTERVAL;

/// Logs progress information about resolver checks.
///
/// # Arguments
///
/// * `start_time` - The start time of the batch
/// * `completed` - Atomic counter of finished checks
/// * `total` - Number of checks in the batch
pub fn log_progress(start_time: Instant, completed: &Arc<AtomicUsize>, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Checked {}/{} resolvers in {:.2} seconds (~{:.2} resolvers/sec)",
        done, total, elapsed_secs, rate
    );
}

/// Spawns a task that calls [`log_progress`] every `LOGGING_INTERVAL` until cancelled.
pub fn spawn_progress_logger(
    start_time: Instant,
    completed: Arc<AtomicUsize>,
    total: usize,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LOGGING_INTERVAL);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => log_progress(start_time, &completed, total),
            }
        }
    })
}
