//! Result aggregation.

use std::time::Instant;

use log::{error, info};
use tokio::sync::mpsc;

use crate::models::ResolverOutcome;

/// Results of one batch of resolver checks.
///
/// `outcomes` is in completion order, which differs from run to run. Sort it
/// if a stable order is needed.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// One outcome per submitted check
    pub outcomes: Vec<ResolverOutcome>,
    /// Number of checks submitted
    pub total: usize,
    /// Number of resolvers classified alive
    pub alive: usize,
    /// Number of resolvers classified dead
    pub dead: usize,
    /// Wall time of the batch in seconds
    pub elapsed_seconds: f64,
}

impl CheckReport {
    /// Addresses of the alive resolvers, in completion order.
    pub fn alive_resolvers(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.alive)
            .map(|o| o.resolver.as_str())
    }
}

/// Drains the result channel into a report.
///
/// Must only be called once every sender is gone, otherwise this waits for them.
pub(super) async fn drain_results(
    results: &mut mpsc::UnboundedReceiver<ResolverOutcome>,
    total: usize,
    start_time: Instant,
) -> CheckReport {
    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = results.recv().await {
        outcomes.push(outcome);
    }

    if outcomes.len() != total {
        error!(
            "{} of {} resolver checks produced no outcome",
            total.saturating_sub(outcomes.len()),
            total
        );
    }

    let alive = outcomes.iter().filter(|o| o.alive).count();
    let dead = outcomes.len() - alive;
    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    info!(
        "Checked {} resolver{} in {:.2}s: {} alive, {} dead",
        outcomes.len(),
        if outcomes.len() == 1 { "" } else { "s" },
        elapsed_seconds,
        alive,
        dead
    );

    CheckReport {
        outcomes,
        total,
        alive,
        dead,
        elapsed_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(resolver: &str, alive: bool) -> ResolverOutcome {
        ResolverOutcome {
            resolver: resolver.to_string(),
            alive,
        }
    }

    #[tokio::test]
    async fn test_drain_counts_alive_and_dead() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(outcome("8.8.8.8", true)).unwrap();
        tx.send(outcome("203.0.113.1", false)).unwrap();
        tx.send(outcome("1.1.1.1", true)).unwrap();
        drop(tx);

        let report = drain_results(&mut rx, 3, Instant::now()).await;
        assert_eq!(report.total, 3);
        assert_eq!(report.alive, 2);
        assert_eq!(report.dead, 1);
        assert_eq!(
            report.alive_resolvers().collect::<Vec<_>>(),
            vec!["8.8.8.8", "1.1.1.1"]
        );
    }

    #[tokio::test]
    async fn test_drain_empty_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel::<ResolverOutcome>();
        drop(tx);
        let report = drain_results(&mut rx, 0, Instant::now()).await;
        assert!(report.outcomes.is_empty());
        assert_eq!(report.alive, 0);
        assert_eq!(report.dead, 0);
    }
}
