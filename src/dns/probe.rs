//! Single lookups against a single resolver.
//!
//! A probe answers one question: did `host` resolve through `resolver` without
//! error? The reason for a failure is only ever logged at debug level.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use log::debug;

use crate::config::{Protocol, DNS_PORT};
use crate::initialization::init_pinned_resolver;

/// Performs one DNS lookup through one resolver.
///
/// Implementations must send the query to `resolver` only and never fall back
/// to another nameserver. `timeout` caps the single lookup; the caller applies
/// its own deadline on top.
pub trait Probe: Send + Sync {
    /// Resolves `host` through `resolver`, returning whether it succeeded.
    fn lookup<'a>(
        &'a self,
        resolver: &'a str,
        protocol: Protocol,
        host: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, bool>;
}

/// Probe backed by `hickory-resolver`, pinned to the candidate address.
#[derive(Debug, Clone, Copy, Default)]
pub struct HickoryProbe;

impl Probe for HickoryProbe {
    fn lookup<'a>(
        &'a self,
        resolver: &'a str,
        protocol: Protocol,
        host: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, bool> {
        async move {
            let Some(address) = parse_resolver_addr(resolver) else {
                debug!("{resolver}: not an IP address, skipping lookup of {host}");
                return false;
            };
            let dns = init_pinned_resolver(address, protocol, timeout);
            match dns.lookup_ip(host).await {
                Ok(_) => true,
                Err(e) => {
                    debug!("{resolver} ({protocol}): lookup of {host} failed: {e}");
                    false
                }
            }
        }
        .boxed()
    }
}

/// Parses a resolver address into the socket address to query.
///
/// Accepts `ip`, `ip:port`, `[ipv6]` and `[ipv6]:port`; the port defaults to 53.
/// Hostnames are rejected: resolving them would mean asking some other resolver.
pub fn parse_resolver_addr(raw: &str) -> Option<SocketAddr> {
    let raw = raw.trim();
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Some(addr);
    }
    let bare = raw
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .unwrap_or(raw);
    bare.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}
