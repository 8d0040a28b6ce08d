//! Application plumbing around the checking core.
//!
//! This module provides input loading, output writing, progress logging and
//! shutdown handling used by `run_check` and the CLI.

pub mod input;
pub mod logging;
pub mod output;
pub mod shutdown;

// Re-export public API
pub use input::{load_resolvers, load_resolvers_from, read_resolver_lines, stdin_is_piped};
pub use logging::{log_progress, spawn_progress_logger};
pub use output::{print_alive, write_alive_resolvers};
pub use shutdown::{cancel_on_ctrl_c, shutdown_gracefully, watch_interrupts};
