//! DNS probing.
//!
//! This module provides the building blocks of a liveness check:
//! - [`Probe`]: one lookup of one hostname through one resolver
//! - [`HickoryProbe`]: the `hickory-resolver` implementation
//! - [`TestHosts`]: the fixed hostnames every resolver must answer for

mod hosts;
mod probe;

// Re-export public API
pub use hosts::TestHosts;
pub(crate) use hosts::validate_test_host;
pub use probe::{parse_resolver_addr, HickoryProbe, Probe};
