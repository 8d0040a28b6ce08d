//! Resolver check requests and their outcomes.

use std::time::Duration;

use crate::config::Protocol;

/// One resolver to check, paired with the transport and timeout to check it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverCheck {
    /// Resolver address as given in the input
    pub resolver: String,
    /// Transport to query it over
    pub protocol: Protocol,
    /// Deadline for all test-host lookups against this resolver
    pub timeout: Duration,
}

impl ResolverCheck {
    /// Creates a check for `resolver`.
    pub fn new(resolver: impl Into<String>, protocol: Protocol, timeout: Duration) -> Self {
        Self {
            resolver: resolver.into(),
            protocol,
            timeout,
        }
    }
}

/// Liveness verdict for one resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolverOutcome {
    /// Resolver address as given in the input
    pub resolver: String,
    /// Whether every test host resolved within the timeout
    pub alive: bool,
}
