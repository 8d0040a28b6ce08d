//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `resolver_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Mapping fatal errors to exit code 1
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use resolver_status::config::Opt;
use resolver_status::initialization::init_logger_with;
use resolver_status::{run_check, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::from(Opt::parse());

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Fatal errors are reported even in silent mode
    if let Err(e) = run_check(config).await {
        eprintln!("resolver_status error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
