//! Error handling.
//!
//! Errors are split by the stage that produces them:
//! - **Initialization**: logger setup
//! - **Configuration**: values rejected before a batch starts
//! - **Input**: the resolver list cannot be loaded (fatal, before any check)
//! - **Output**: the results file cannot be written (fatal, after all checks)

mod types;

// Re-export public API
pub use types::{ConfigValidationError, InitializationError, InputError, OutputError};
