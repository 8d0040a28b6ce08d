//! Configuration constants.
//!
//! This module defines the defaults and fixed values used throughout the application,
//! including the liveness oracle hostnames, timeouts, and pool sizing.

use std::time::Duration;

/// Hostnames every candidate resolver must answer for to be considered alive.
///
/// Lookups run in this order and the first failure ends the check.
pub const DEFAULT_TEST_HOSTS: &[&str] = &["google.com", "cloudflare.com", "amazon.com"];

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 10;

/// Default per-resolver timeout in seconds
/// Covers the whole sequence of test-host lookups for one resolver, not each lookup
pub const DEFAULT_TIMEOUT_SECS: u64 = 1;

/// Port used when a resolver address carries none
pub const DNS_PORT: u16 = 53;

/// Interval between progress log lines
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);

/// Marker for reading resolver candidates from stdin via `--list`
pub const STDIN_MARKER: &str = "-";
