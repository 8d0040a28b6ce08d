//! The liveness oracle: hostnames every resolver must answer for.

use std::net::IpAddr;
use std::sync::Arc;

use crate::config::{ConfigValidationError, DEFAULT_TEST_HOSTS};

/// Checks that `host` can only be answered by the resolver under test.
///
/// `position` is the 1-based index used in the error message. Blank entries,
/// IP literals and `localhost` names are rejected: `hickory-resolver` answers
/// those locally without sending a query, so they would pass every resolver.
pub(crate) fn validate_test_host(
    position: usize,
    host: &str,
) -> Result<(), ConfigValidationError> {
    let host = host.trim();
    let trimmed = host.trim_end_matches('.');
    let bare = trimmed
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(trimmed);

    let problem = if host.is_empty() {
        "is empty"
    } else if bare.parse::<IpAddr>().is_ok() {
        "is an IP address, which is answered without querying the resolver"
    } else if trimmed.eq_ignore_ascii_case("localhost")
        || trimmed.to_ascii_lowercase().ends_with(".localhost")
    {
        "is a localhost name, which is answered without querying the resolver"
    } else {
        return Ok(());
    };
    Err(ConfigValidationError::new(
        "test_hosts",
        format!("test host #{position} '{host}' {problem}"),
    ))
}

/// Immutable, ordered list of hostnames used to judge a resolver.
///
/// Cloning is cheap and shares the same list, so every worker holds its own
/// handle without any locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestHosts(Arc<[String]>);

impl TestHosts {
    /// Creates a host list.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` if the list is empty or any entry is
    /// blank, an IP address or a `localhost` name.
    pub fn new<I, S>(hosts: I) -> Result<Self, ConfigValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();
        if hosts.is_empty() {
            return Err(ConfigValidationError::new(
                "test_hosts",
                "at least one test host is required to judge a resolver alive",
            ));
        }
        for (i, host) in hosts.iter().enumerate() {
            validate_test_host(i + 1, host)?;
        }
        Ok(Self(hosts.into()))
    }

    /// Hostnames in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of hostnames.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a list built through [`TestHosts::new`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TestHosts {
    fn default() -> Self {
        Self(DEFAULT_TEST_HOSTS.iter().map(|h| h.to_string()).collect())
    }
}
