//! resolver_status library: DNS resolver liveness checking
//!
//! This library filters a list of candidate DNS resolvers down to the ones
//! that currently answer lookups. Every candidate is asked to resolve a fixed
//! set of test hostnames within a timeout; it is alive only if all of them
//! succeed. Checks run on a bounded pool of concurrent workers.
//!
//! # Example
//!
//! ```no_run
//! use resolver_status::{run_check, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     list: Some(PathBuf::from("resolvers.txt")),
//!     output: Some(PathBuf::from("alive.txt")),
//!     workers: 50,
//!     silent: true,
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("{} of {} resolvers alive", report.alive, report.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod dns;
mod error_handling;
pub mod initialization;
mod liveness;
mod models;
mod run;

// Re-export public API
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel, Protocol};
pub use dns::{HickoryProbe, Probe, TestHosts};
pub use error_handling::{InitializationError, InputError, OutputError};
pub use liveness::LivenessEvaluator;
pub use models::{ResolverCheck, ResolverOutcome};
pub use run::{AliveCallback, AliveSink, BatchState, CheckReport, WorkerPool};

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

/// Runs a full check with the provided configuration.
///
/// Loads candidates (piped stdin, then the list file), checks them through
/// `hickory-resolver`, prints alive resolvers as they are found unless
/// `silent` is set, and writes the alive ones to `output` if given.
///
/// # Errors
///
/// This function will return an error if:
/// - The configuration is invalid (e.g. zero workers)
/// - The resolver list or stdin cannot be read (before any check runs)
/// - The output file cannot be written (after every check has finished)
pub async fn run_check(config: Config) -> Result<CheckReport> {
    run_check_with(
        config,
        Arc::new(HickoryProbe),
        app::stdin_is_piped(),
        Arc::new(app::print_alive),
    )
    .await
}

/// Same as [`run_check`] with an explicit probe, stdin policy and alive printer.
///
/// `read_stdin` forces reading candidates from stdin; `--list -` does too.
/// `on_alive` receives each alive resolver as soon as it is classified, unless
/// `silent` is set.
pub async fn run_check_with(
    config: Config,
    probe: Arc<dyn Probe>,
    read_stdin: bool,
    on_alive: AliveSink,
) -> Result<CheckReport> {
    config.validate().context("Invalid configuration")?;

    let checks = app::load_resolvers(
        config.list.as_deref(),
        read_stdin,
        config.protocol,
        config.timeout(),
    )
    .await
    .context("Failed to load resolvers")?;
    if checks.is_empty() {
        warn!("No resolver candidates given (use --list or pipe them on stdin)");
    }

    let hosts = TestHosts::new(config.test_hosts.iter().map(|h| h.trim().to_string()))?;
    info!(
        "Checking {} resolver(s) over {} with {} worker(s), {}s timeout, test hosts: {}",
        checks.len(),
        config.protocol,
        config.workers,
        config.timeout_seconds,
        hosts.iter().collect::<Vec<_>>().join(", ")
    );

    let batch = CancellationToken::new();
    let interrupt = app::cancel_on_ctrl_c(batch.clone());

    let mut pool = WorkerPool::new(config.workers, LivenessEvaluator::new(probe, hosts))?
        .with_cancellation(batch);
    if !config.silent {
        pool = pool.on_alive(move |outcome| on_alive(outcome));
    }
    let report = pool.run(checks).await;
    interrupt.abort();

    if let Some(output) = config.output.as_deref() {
        let written = app::write_alive_resolvers(output, &report.outcomes)
            .context("Failed to write results")?;
        info!("Wrote {} alive resolver(s) to {}", written, output.display());
    }

    Ok(report)
}
