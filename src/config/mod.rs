//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (test hostnames, defaults, ports)
//! - CLI option types and parsing
//! - The library `Config` and its validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel, Opt, Protocol};
