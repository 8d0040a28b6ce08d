//! DNS resolver initialization.
//!
//! This module builds resolvers that talk to exactly one nameserver. Nothing
//! from the system configuration (`/etc/resolv.conf`, hosts file, search
//! domains) is consulted, so every query reaches the candidate under test.

use std::net::SocketAddr;
use std::time::Duration;

use hickory_resolver::config::{
    NameServerConfig, Protocol as HickoryProtocol, ResolverConfig, ResolverOpts,
};
use hickory_resolver::TokioAsyncResolver;

use crate::config::Protocol;

impl From<Protocol> for HickoryProtocol {
    fn from(p: Protocol) -> Self {
        match p {
            Protocol::Udp => HickoryProtocol::Udp,
            Protocol::Tcp => HickoryProtocol::Tcp,
        }
    }
}

/// Builds the resolver configuration pinned to a single nameserver.
pub fn pinned_resolver_config(address: SocketAddr, protocol: Protocol) -> ResolverConfig {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig::new(address, protocol.into()));
    config
}

/// Builds the resolver options used for every probe.
///
/// A single attempt per query: a failed probe is never retried.
pub fn pinned_resolver_opts(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    // Set ndots to 0 to prevent search domain appending
    opts.ndots = 0;
    opts.use_hosts_file = false;
    opts
}

/// Initializes a resolver that sends every lookup to `address` over `protocol`.
///
/// # Arguments
///
/// * `address` - Socket address of the only nameserver to use
/// * `protocol` - Transport for the queries
/// * `timeout` - Upper bound for a single query
pub fn init_pinned_resolver(
    address: SocketAddr,
    protocol: Protocol,
    timeout: Duration,
) -> TokioAsyncResolver {
    TokioAsyncResolver::tokio(
        pinned_resolver_config(address, protocol),
        pinned_resolver_opts(timeout),
    )
}
