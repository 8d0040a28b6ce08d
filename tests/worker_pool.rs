//! Worker pool behavior: completeness, bounds, ordering independence, cancellation.

mod helpers;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use helpers::{checks, numbered_resolvers, FakeProbe};
use resolver_status::{
    LivenessEvaluator, Protocol, ResolverCheck, ResolverOutcome, TestHosts, WorkerPool,
};
use tokio_util::sync::CancellationToken;

fn pool(workers: usize, probe: Arc<FakeProbe>) -> WorkerPool {
    WorkerPool::new(workers, LivenessEvaluator::new(probe, TestHosts::default()))
        .expect("valid worker count")
}

fn as_set(outcomes: &[ResolverOutcome]) -> HashSet<(String, bool)> {
    outcomes
        .iter()
        .map(|o| (o.resolver.clone(), o.alive))
        .collect()
}

#[tokio::test]
async fn test_one_outcome_per_check_for_any_worker_count() {
    let resolvers = numbered_resolvers(25);
    for workers in [1, 3, 16, 100] {
        let probe = Arc::new(FakeProbe::alive(["192.0.2.1", "192.0.2.7"]));
        let requests: Vec<ResolverCheck> = resolvers
            .iter()
            .map(|r| ResolverCheck::new(r.clone(), Protocol::Udp, Duration::from_secs(1)))
            .collect();

        let report = pool(workers, probe).run(requests).await;

        assert_eq!(report.outcomes.len(), 25, "workers={workers}");
        assert_eq!(report.total, 25);
        let names: HashSet<&str> = report.outcomes.iter().map(|o| o.resolver.as_str()).collect();
        assert_eq!(names.len(), 25, "no duplicates, workers={workers}");
        assert_eq!(report.alive, 2);
        assert_eq!(report.dead, 23);
    }
}

#[tokio::test]
async fn test_empty_batch_completes_immediately() {
    let probe = Arc::new(FakeProbe::default());
    let start = Instant::now();
    let report = pool(8, probe.clone()).run(Vec::new()).await;
    assert!(report.outcomes.is_empty());
    assert_eq!(report.alive, 0);
    assert_eq!(probe.lookups(), 0);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_zero_workers_is_rejected() {
    let evaluator = LivenessEvaluator::new(Arc::new(FakeProbe::default()), TestHosts::default());
    let err = WorkerPool::new(0, evaluator).err().expect("zero workers must fail");
    assert_eq!(err.field, "workers");
    assert!(err.message.contains("greater than 0"));
}

#[tokio::test]
async fn test_alive_set_does_not_depend_on_worker_count() {
    let resolvers = numbered_resolvers(30);
    let alive = ["192.0.2.2", "192.0.2.11", "192.0.2.29", "192.0.2.30"];
    let mut previous: Option<HashSet<(String, bool)>> = None;
    for workers in [1, 2, 7, 30] {
        let probe = Arc::new(FakeProbe::alive(alive).with_delay(Duration::from_millis(2)));
        let refs: Vec<&str> = resolvers.iter().map(String::as_str).collect();
        let report = pool(workers, probe)
            .run(checks(&refs, Duration::from_secs(1)))
            .await;
        let set = as_set(&report.outcomes);
        if let Some(prev) = &previous {
            assert_eq!(&set, prev, "workers={workers}");
        }
        previous = Some(set);
    }
}

#[tokio::test]
async fn test_unreachable_resolver_is_dead_and_public_one_alive() {
    let probe = Arc::new(FakeProbe::alive(["8.8.8.8"]).with_hanging(["203.0.113.1"]));
    let start = Instant::now();
    let report = pool(10, probe)
        .run(checks(&["8.8.8.8", "203.0.113.1"], Duration::from_millis(200)))
        .await;

    let expected: HashSet<(String, bool)> = [
        ("8.8.8.8".to_string(), true),
        ("203.0.113.1".to_string(), false),
    ]
    .into_iter()
    .collect();
    assert_eq!(as_set(&report.outcomes), expected);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_zero_timeout_classifies_responsive_resolver_dead() {
    let probe = Arc::new(FakeProbe::alive(["8.8.8.8"]));
    let report = pool(1, probe.clone())
        .run(checks(&["8.8.8.8"], Duration::ZERO))
        .await;

    assert_eq!(
        report.outcomes,
        vec![ResolverOutcome {
            resolver: "8.8.8.8".to_string(),
            alive: false,
        }]
    );
    assert_eq!(probe.lookups(), 0);
}

#[tokio::test]
async fn test_concurrency_never_exceeds_worker_count() {
    let resolvers = numbered_resolvers(20);
    let refs: Vec<&str> = resolvers.iter().map(String::as_str).collect();
    let probe = Arc::new(FakeProbe::alive(resolvers.clone()).with_delay(Duration::from_millis(10)));

    let report = pool(4, probe.clone())
        .run(checks(&refs, Duration::from_secs(2)))
        .await;

    assert_eq!(report.alive, 20);
    assert!(probe.max_in_flight() <= 4, "saw {}", probe.max_in_flight());
    assert!(probe.max_in_flight() >= 1);
    // Three test hosts per resolver
    assert_eq!(probe.lookups(), 60);
}

#[tokio::test]
async fn test_on_alive_called_once_per_alive_resolver() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let probe = Arc::new(FakeProbe::alive(["9.9.9.9", "1.1.1.1"]));
    let report = pool(3, probe)
        .on_alive(move |o| sink.lock().unwrap().push(o.resolver.clone()))
        .run(checks(
            &["9.9.9.9", "192.0.2.1", "1.1.1.1", "192.0.2.2"],
            Duration::from_secs(1),
        ))
        .await;

    let mut seen = seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(seen, vec!["1.1.1.1", "9.9.9.9"]);
    assert_eq!(report.alive, 2);
}

#[tokio::test]
async fn test_duplicate_candidates_are_checked_twice() {
    let probe = Arc::new(FakeProbe::alive(["8.8.8.8"]));
    let report = pool(2, probe)
        .run(checks(&["8.8.8.8", "8.8.8.8"], Duration::from_secs(1)))
        .await;
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.alive_resolvers().count(), 2);
}

#[tokio::test]
async fn test_cancellation_still_reports_every_check() {
    let probe = Arc::new(FakeProbe::default().with_hanging(["192.0.2.1", "192.0.2.2", "192.0.2.3"]));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let report = pool(2, probe)
        .with_cancellation(cancel)
        .run(checks(
            &["192.0.2.1", "192.0.2.2", "192.0.2.3"],
            Duration::from_secs(30),
        ))
        .await;

    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.alive, 0);
}
