//! Liveness evaluation of a single resolver.
//!
//! A resolver is alive only if it answers every test hostname. Lookups run in
//! the declared order and stop at the first failure. One deadline, taken from
//! the request's timeout, covers the whole sequence.

use std::sync::Arc;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::dns::{Probe, TestHosts};
use crate::models::{ResolverCheck, ResolverOutcome};

/// Runs the test-host sequence against one resolver at a time.
#[derive(Clone)]
pub struct LivenessEvaluator {
    probe: Arc<dyn Probe>,
    hosts: TestHosts,
}

impl LivenessEvaluator {
    /// Creates an evaluator probing through `probe` for every host in `hosts`.
    pub fn new(probe: Arc<dyn Probe>, hosts: TestHosts) -> Self {
        Self { probe, hosts }
    }

    /// Classifies one resolver.
    ///
    /// Never fails: a probe error, an expired deadline or a cancelled batch all
    /// yield `alive == false`. A zero timeout classifies the resolver dead
    /// without probing. There is no retry.
    pub async fn evaluate(
        &self,
        check: &ResolverCheck,
        cancel: &CancellationToken,
    ) -> ResolverOutcome {
        if check.timeout.is_zero() {
            debug!("{}: zero timeout, classified dead", check.resolver);
            return ResolverOutcome {
                resolver: check.resolver.clone(),
                alive: false,
            };
        }
        let alive = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("{}: batch cancelled, classified dead", check.resolver);
                false
            }
            result = tokio::time::timeout(check.timeout, self.probe_all(check)) => {
                result.unwrap_or_else(|_| {
                    debug!("{}: no answer within {:?}", check.resolver, check.timeout);
                    false
                })
            }
        };
        ResolverOutcome {
            resolver: check.resolver.clone(),
            alive,
        }
    }

    async fn probe_all(&self, check: &ResolverCheck) -> bool {
        for host in self.hosts.iter() {
            let ok = self
                .probe
                .lookup(&check.resolver, check.protocol, host, check.timeout)
                .await;
            if !ok {
                return false;
            }
        }
        true
    }
}
