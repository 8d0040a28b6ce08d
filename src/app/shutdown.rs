//! Graceful shutdown handling.

use futures::{Stream, StreamExt};
use log::{error, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Exit status used when a second interrupt aborts the run (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Stops background tasks and waits for them to exit.
pub async fn shutdown_gracefully(cancel: CancellationToken, logging_task: Option<JoinHandle<()>>) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}

/// Cancels `batch` on the first interrupt and waits for a second one.
///
/// Returns `true` once a second interrupt arrives, `false` if `interrupts`
/// ends first.
pub async fn watch_interrupts<S>(interrupts: S, batch: CancellationToken) -> bool
where
    S: Stream<Item = ()>,
{
    let mut interrupts = std::pin::pin!(interrupts);
    if interrupts.next().await.is_none() {
        return false;
    }
    warn!("Interrupted: remaining resolvers will be reported dead (press Ctrl-C again to exit now)");
    batch.cancel();
    interrupts.next().await.is_some()
}

/// Cancels `batch` when the process receives Ctrl-C, and exits on a second one.
///
/// The returned handle should be aborted once the batch is over.
pub fn cancel_on_ctrl_c(batch: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let ctrl_c = futures::stream::unfold((), |()| async {
            tokio::signal::ctrl_c().await.ok().map(|()| ((), ()))
        });
        if watch_interrupts(ctrl_c, batch).await {
            error!("Interrupted again, exiting without writing results");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
}
