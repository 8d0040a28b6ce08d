//! Error type definitions.
//!
//! This module defines the errors that can escape a run. Probe failures never
//! appear here: they are absorbed into a resolver's liveness classification.

use std::fmt;
use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while loading resolver candidates.
///
/// These are fatal: the run stops before any check is started.
#[derive(Error, Debug)]
pub enum InputError {
    /// The resolver list file could not be opened.
    #[error("Failed to open resolver list {}", .path.display())]
    Open {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Reading lines from the list file failed part way.
    #[error("Failed to read resolver list {}", .path.display())]
    Read {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Reading lines from standard input failed.
    #[error("Failed to read resolvers from stdin")]
    Stdin(#[source] io::Error),
}

/// Errors raised while writing the alive resolvers file.
///
/// Only produced after every check has completed.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The output file could not be created or truncated.
    #[error("Failed to create output file {}", .path.display())]
    Create {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Writing to the output file failed.
    #[error("Failed to write output file {}", .path.display())]
    Write {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

/// A configuration value that cannot be used for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human readable explanation, including the accepted range
    pub message: String,
}

impl ConfigValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}
