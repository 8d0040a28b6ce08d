//! Batch scheduling.
//!
//! A [`WorkerPool`] runs a batch of resolver checks on at most `W` concurrent
//! workers. The batch moves through
//! `Idle → Submitting → AwaitingCompletion → Draining → Done`:
//! every check is queued and the queue closed, the pool waits until every
//! worker has exited (the queue is drained and each check has produced an
//! outcome), then the result channel is drained into a [`CheckReport`].

mod finalize;
mod task;

use std::fmt;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, error};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::app::{shutdown_gracefully, spawn_progress_logger};
use crate::config::ConfigValidationError;
use crate::liveness::LivenessEvaluator;
use crate::models::{ResolverCheck, ResolverOutcome};

pub use finalize::CheckReport;
pub use task::{AliveCallback, AliveSink};

use task::{run_worker, WorkerParams};

/// Lifecycle of one batch. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Nothing queued yet
    Idle,
    /// Workers started, checks being queued
    Submitting,
    /// Queue closed, waiting for every worker to exit
    AwaitingCompletion,
    /// Collecting outcomes from the result channel
    Draining,
    /// Report built
    Done,
}

impl BatchState {
    /// The only state this one may move to.
    pub fn successor(self) -> Option<BatchState> {
        match self {
            BatchState::Idle => Some(BatchState::Submitting),
            BatchState::Submitting => Some(BatchState::AwaitingCompletion),
            BatchState::AwaitingCompletion => Some(BatchState::Draining),
            BatchState::Draining => Some(BatchState::Done),
            BatchState::Done => None,
        }
    }

    fn advance(&mut self) {
        match self.successor() {
            Some(next) => {
                debug!("Batch {self} -> {next}");
                *self = next;
            }
            None => error!("Batch already {self}, ignoring transition"),
        }
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Idle => "idle",
            BatchState::Submitting => "submitting",
            BatchState::AwaitingCompletion => "awaiting completion",
            BatchState::Draining => "draining",
            BatchState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Bounded pool of workers evaluating resolver checks.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use resolver_status::{HickoryProbe, LivenessEvaluator, Protocol, ResolverCheck, TestHosts, WorkerPool};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let evaluator = LivenessEvaluator::new(Arc::new(HickoryProbe), TestHosts::default());
/// let pool = WorkerPool::new(10, evaluator)?.on_alive(|o| println!("{}", o.resolver));
/// let checks = vec![ResolverCheck::new("8.8.8.8", Protocol::Udp, Duration::from_secs(1))];
/// let report = pool.run(checks).await;
/// assert_eq!(report.outcomes.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct WorkerPool {
    workers: usize,
    evaluator: LivenessEvaluator,
    on_alive: AliveCallback,
    cancel: CancellationToken,
}

impl WorkerPool {
    /// Creates a pool of `workers` workers.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` if `workers` is 0: nothing would ever
    /// drain the queue and the batch would never complete.
    pub fn new(
        workers: usize,
        evaluator: LivenessEvaluator,
    ) -> Result<Self, ConfigValidationError> {
        if workers == 0 {
            return Err(ConfigValidationError::new(
                "workers",
                "workers must be greater than 0 (got 0)",
            ));
        }
        Ok(Self {
            workers,
            evaluator,
            on_alive: None,
            cancel: CancellationToken::new(),
        })
    }

    /// Calls `callback` from the worker as soon as a resolver is classified alive.
    pub fn on_alive<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ResolverOutcome) + Send + Sync + 'static,
    {
        self.on_alive = Some(Arc::new(callback));
        self
    }

    /// Uses `cancel` to stop the batch early.
    ///
    /// Once cancelled, in-flight and still queued checks are classified dead,
    /// so the report still holds one outcome per check.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Runs one batch to completion.
    pub async fn run(&self, checks: Vec<ResolverCheck>) -> CheckReport {
        let start_time = Instant::now();
        let total = checks.len();
        let mut state = BatchState::Idle;

        state.advance();
        let (task_tx, task_rx) = mpsc::channel::<ResolverCheck>(total.max(1));
        let task_rx = Arc::new(Mutex::new(task_rx));
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let completed = Arc::new(AtomicUsize::new(0));

        let worker_count = self.workers.min(total);
        debug!("Starting {worker_count} worker(s) for {total} resolver(s)");
        let mut workers = JoinSet::new();
        for id in 0..worker_count {
            workers.spawn(run_worker(WorkerParams {
                id,
                tasks: Arc::clone(&task_rx),
                results: result_tx.clone(),
                evaluator: self.evaluator.clone(),
                on_alive: self.on_alive.clone(),
                cancel: self.cancel.clone(),
                completed: Arc::clone(&completed),
            }));
        }
        // Workers hold the only senders: the channel closes when the last one exits
        drop(result_tx);

        for check in checks {
            // Capacity equals the batch size, so this never waits
            if task_tx.send(check).await.is_err() {
                error!("Task queue closed before all resolvers were queued");
                break;
            }
        }
        drop(task_tx);

        state.advance();
        let logging_cancel = CancellationToken::new();
        let logging_task = spawn_progress_logger(
            start_time,
            Arc::clone(&completed),
            total,
            logging_cancel.clone(),
        );
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!("Worker task failed: {e}");
            }
        }
        shutdown_gracefully(logging_cancel, Some(logging_task)).await;

        state.advance();
        let report = finalize::drain_results(&mut result_rx, total, start_time).await;

        state.advance();
        report
    }
}
