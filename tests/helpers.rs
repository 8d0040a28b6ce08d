// Shared test helpers: a scriptable probe and check builders.
//
// Lets the pool and the full run be exercised without any network access.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use resolver_status::{AliveSink, Probe, Protocol, ResolverCheck, ResolverOutcome};

/// Probe whose answers are decided by resolver address.
///
/// - resolvers in `alive` answer every host
/// - resolvers in `hanging` never answer
/// - anything else fails immediately
#[derive(Default)]
pub struct FakeProbe {
    alive: HashSet<String>,
    hanging: HashSet<String>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    lookups: AtomicUsize,
}

#[allow(dead_code)] // Not every test file uses every helper
impl FakeProbe {
    pub fn alive<I, S>(alive: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alive: alive.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_hanging<I, S>(mut self, hanging: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hanging = hanging.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Probe for FakeProbe {
    fn lookup<'a>(
        &'a self,
        resolver: &'a str,
        _protocol: Protocol,
        _host: &'a str,
        _timeout: Duration,
    ) -> BoxFuture<'a, bool> {
        async move {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.hanging.contains(resolver) {
                return futures::future::pending().await;
            }
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.alive.contains(resolver)
        }
        .boxed()
    }
}

/// Builds UDP checks for `resolvers` with the given timeout.
#[allow(dead_code)] // Used by other test files
pub fn checks(resolvers: &[&str], timeout: Duration) -> Vec<ResolverCheck> {
    resolvers
        .iter()
        .map(|r| ResolverCheck::new(*r, Protocol::Udp, timeout))
        .collect()
}

/// `count` distinct documentation-range addresses.
#[allow(dead_code)] // Used by other test files
pub fn numbered_resolvers(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("192.0.2.{}", i + 1)).collect()
}

/// Alive printer that collects resolvers instead of writing to stdout.
#[allow(dead_code)] // Used by other test files
pub fn recording_sink() -> (AliveSink, Arc<Mutex<Vec<String>>>) {
    let printed = Arc::new(Mutex::new(Vec::new()));
    let sink_printed = Arc::clone(&printed);
    let sink: AliveSink = Arc::new(move |outcome: &ResolverOutcome| {
        sink_printed.lock().unwrap().push(outcome.resolver.clone());
    });
    (sink, printed)
}

/// Alive printer that drops everything.
#[allow(dead_code)] // Used by other test files
pub fn discard_sink() -> AliveSink {
    Arc::new(|_: &ResolverOutcome| {})
}
