//! Worker loop.
//!
//! Each worker pulls one check at a time from the shared queue, evaluates it
//! and pushes the outcome to the result channel until the queue is closed and
//! empty.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{trace, warn};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::liveness::LivenessEvaluator;
use crate::models::{ResolverCheck, ResolverOutcome};

/// Receiver of alive resolvers, called from the worker that classified them.
pub type AliveSink = Arc<dyn Fn(&ResolverOutcome) + Send + Sync>;

/// Type alias for the optional callback invoked as soon as a resolver is classified alive.
pub type AliveCallback = Option<AliveSink>;

/// Receiving end of the task queue, shared by all workers.
pub(super) type TaskQueue = Arc<Mutex<mpsc::Receiver<ResolverCheck>>>;

/// Everything one worker needs.
pub(super) struct WorkerParams {
    pub id: usize,
    pub tasks: TaskQueue,
    pub results: mpsc::UnboundedSender<ResolverOutcome>,
    pub evaluator: LivenessEvaluator,
    pub on_alive: AliveCallback,
    pub cancel: CancellationToken,
    pub completed: Arc<AtomicUsize>,
}

pub(super) async fn run_worker(params: WorkerParams) {
    let WorkerParams {
        id,
        tasks,
        results,
        evaluator,
        on_alive,
        cancel,
        completed,
    } = params;

    loop {
        // The lock is only held while waiting for the next check
        let next = tasks.lock().await.recv().await;
        let Some(check) = next else {
            break;
        };

        let outcome = evaluator.evaluate(&check, &cancel).await;
        if let (true, Some(callback)) = (outcome.alive, &on_alive) {
            callback(&outcome);
        }
        completed.fetch_add(1, Ordering::SeqCst);

        if results.send(outcome).is_err() {
            warn!("Worker {id}: result channel closed, stopping");
            break;
        }
    }
    trace!("Worker {id}: task queue drained");
}
