//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_TEST_HOSTS, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use crate::dns::validate_test_host;
pub use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Transport used to talk to a candidate resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Protocol {
    /// DNS over UDP (default)
    Udp,
    /// DNS over TCP
    Tcp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Udp => f.write_str("udp"),
            Protocol::Tcp => f.write_str("tcp"),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through `clap`.
///
/// # Examples
///
/// ```no_run
/// use resolver_status::{Config, Protocol};
/// use std::path::PathBuf;
///
/// let config = Config {
///     list: Some(PathBuf::from("resolvers.txt")),
///     output: Some(PathBuf::from("alive.txt")),
///     protocol: Protocol::Tcp,
///     workers: 50,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read resolver candidates from (`-` for stdin)
    pub list: Option<PathBuf>,

    /// File to write alive resolvers to
    pub output: Option<PathBuf>,

    /// Transport used for every probe
    pub protocol: Protocol,

    /// Number of concurrent workers
    pub workers: usize,

    /// Per-resolver timeout in seconds
    pub timeout_seconds: u64,

    /// Suppress printing alive resolvers as they are found
    pub silent: bool,

    /// Hostnames every resolver must answer for
    pub test_hosts: Vec<String>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list: None,
            output: None,
            protocol: Protocol::Udp,
            workers: DEFAULT_WORKERS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            silent: false,
            test_hosts: DEFAULT_TEST_HOSTS.iter().map(|h| h.to_string()).collect(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Per-resolver timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validates the configuration before any check runs.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` naming the offending field when:
    /// - `workers` is 0 (no worker would ever drain the queue)
    /// - `test_hosts` is empty, or an entry is blank, an IP address or a
    ///   `localhost` name (those never reach the resolver under test)
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.workers == 0 {
            return Err(ConfigValidationError::new(
                "workers",
                "workers must be greater than 0 (got 0)",
            ));
        }
        if self.test_hosts.is_empty() {
            return Err(ConfigValidationError::new(
                "test_hosts",
                "at least one test host is required to judge a resolver alive",
            ));
        }
        for (i, host) in self.test_hosts.iter().enumerate() {
            validate_test_host(i + 1, host)?;
        }
        Ok(())
    }
}

fn parse_worker_count(raw: &str) -> Result<usize, String> {
    let count: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a positive integer"))?;
    if count == 0 {
        return Err("workers must be greater than 0".to_string());
    }
    Ok(count)
}

/// Command-line options.
///
/// This struct is automatically generated by `clap` from the field attributes
/// and converts into a library [`Config`].
///
/// # Examples
///
/// ```bash
/// # Check a list over UDP with the defaults
/// resolver_status --list resolvers.txt --output alive.txt
///
/// # Pipe candidates in, use TCP with more workers
/// cat resolvers.txt | resolver_status --protocol tcp --workers 100 --timeout 2
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "resolver_status",
    about = "Checks a list of DNS resolvers and keeps the ones that answer."
)]
pub struct Opt {
    /// File with one resolver address per line (`-` reads stdin)
    #[arg(short, long, value_parser)]
    pub list: Option<PathBuf>,

    /// File to write alive resolvers to (created or truncated)
    #[arg(short, long, value_parser)]
    pub output: Option<PathBuf>,

    /// Network protocol: udp|tcp
    #[arg(short, long, value_enum, default_value_t = Protocol::Udp)]
    pub protocol: Protocol,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, value_parser = parse_worker_count)]
    pub workers: usize,

    /// Timeout in seconds for all lookups against one resolver
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Do not print alive resolvers as they are found
    #[arg(short, long)]
    pub silent: bool,

    /// Hostname to resolve through every candidate (repeatable, replaces the defaults)
    #[arg(long = "test-host", value_name = "HOST")]
    pub test_hosts: Vec<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        let test_hosts = if opt.test_hosts.is_empty() {
            Config::default().test_hosts
        } else {
            opt.test_hosts
        };
        Self {
            list: opt.list,
            output: opt.output,
            protocol: opt.protocol,
            workers: opt.workers,
            timeout_seconds: opt.timeout,
            silent: opt.silent,
            test_hosts,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_protocol_display() {
        assert_eq!(Protocol::Udp.to_string(), "udp");
        assert_eq!(Protocol::Tcp.to_string(), "tcp");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.workers, 10);
        assert_eq!(config.timeout_seconds, 1);
        assert_eq!(config.protocol, Protocol::Udp);
        assert!(!config.silent);
        assert!(config.list.is_none());
        assert!(config.output.is_none());
        assert_eq!(
            config.test_hosts,
            vec!["google.com", "cloudflare.com", "amazon.com"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_duration() {
        let config = Config {
            timeout_seconds: 3,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = Config {
            workers: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "workers");
    }

    #[test]
    fn test_empty_test_hosts_rejected() {
        let config = Config {
            test_hosts: Vec::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "test_hosts");

        let config = Config {
            test_hosts: vec!["google.com".to_string(), "  ".to_string()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("#2"));
    }

    #[test]
    fn test_locally_answered_test_hosts_rejected() {
        for host in [
            "127.0.0.1",
            "8.8.8.8",
            "::1",
            "[2606:4700::1111]",
            "localhost",
            "LOCALHOST.",
            "printer.localhost",
        ] {
            let config = Config {
                test_hosts: vec!["google.com".to_string(), host.to_string()],
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.field, "test_hosts", "{host} should be rejected");
            assert!(err.message.contains("#2"), "{}", err.message);
        }
    }

    #[test]
    fn test_names_containing_localhost_are_allowed() {
        let config = Config {
            test_hosts: vec!["localhost.example.com".to_string(), "mylocalhost".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_worker_count() {
        assert_eq!(parse_worker_count("4"), Ok(4));
        assert!(parse_worker_count("0").is_err());
        assert!(parse_worker_count("-3").is_err());
        assert!(parse_worker_count("many").is_err());
    }

    #[test]
    fn test_opt_into_config_keeps_default_hosts() {
        let opt = Opt::try_parse_from(["resolver_status", "--list", "r.txt"]).unwrap();
        let config = Config::from(opt);
        assert_eq!(config.list, Some(PathBuf::from("r.txt")));
        assert_eq!(config.test_hosts.len(), 3);

        let opt = Opt::try_parse_from([
            "resolver_status",
            "--test-host",
            "example.org",
            "--timeout",
            "0",
        ])
        .unwrap();
        let config = Config::from(opt);
        assert_eq!(config.test_hosts, vec!["example.org"]);
        assert_eq!(config.timeout_seconds, 0);
    }
}
