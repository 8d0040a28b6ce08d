//! Loading resolver candidates.
//!
//! Candidates come from piped stdin and/or a list file, stdin first. Lines are
//! trimmed; blank lines and `#` comments are skipped. Addresses are not
//! validated here: a malformed one simply fails its probes.

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::{Protocol, STDIN_MARKER};
use crate::error_handling::InputError;
use crate::models::ResolverCheck;

/// Whether stdin is a pipe or file rather than an interactive terminal.
pub fn stdin_is_piped() -> bool {
    !std::io::stdin().is_terminal()
}

/// Whether `list` is the `-` marker meaning "read stdin".
pub fn is_stdin_marker(list: &Path) -> bool {
    list.as_os_str() == STDIN_MARKER
}

/// Reads resolver addresses, one per line.
pub async fn read_resolver_lines<R>(reader: R) -> std::io::Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut addresses = Vec::new();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        addresses.push(trimmed.to_string());
    }
    Ok(addresses)
}

/// Builds one check per candidate from stdin (if `read_stdin`) and then `list`.
///
/// A `list` of `-` also reads stdin.
///
/// # Errors
///
/// Returns an `InputError` if the list file cannot be opened or read, or if
/// reading stdin fails. No partial result is returned.
pub async fn load_resolvers(
    list: Option<&Path>,
    read_stdin: bool,
    protocol: Protocol,
    timeout: Duration,
) -> Result<Vec<ResolverCheck>, InputError> {
    let list_is_stdin = list.is_some_and(is_stdin_marker);
    let stdin = (read_stdin || list_is_stdin).then(|| BufReader::new(tokio::io::stdin()));
    load_resolvers_from(list, stdin, protocol, timeout).await
}

/// Same as [`load_resolvers`] with `stdin` standing in for the process stdin.
///
/// Candidates from `stdin` come first, then those from `list`. A `list` of
/// `-` adds nothing on its own.
///
/// # Errors
///
/// Returns an `InputError` if the list file cannot be opened or read, or if
/// reading `stdin` fails.
pub async fn load_resolvers_from<R>(
    list: Option<&Path>,
    stdin: Option<R>,
    protocol: Protocol,
    timeout: Duration,
) -> Result<Vec<ResolverCheck>, InputError>
where
    R: AsyncBufRead + Unpin,
{
    let mut addresses = Vec::new();

    if let Some(stdin) = stdin {
        let from_stdin = read_resolver_lines(stdin)
            .await
            .map_err(InputError::Stdin)?;
        debug!("Read {} resolver(s) from stdin", from_stdin.len());
        addresses.extend(from_stdin);
    }

    if let Some(path) = list.filter(|p| !is_stdin_marker(p)) {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| InputError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        let from_file = read_resolver_lines(BufReader::new(file))
            .await
            .map_err(|source| InputError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Read {} resolver(s) from {}", from_file.len(), path.display());
        addresses.extend(from_file);
    }

    info!("Loaded {} resolver candidate(s)", addresses.len());
    Ok(addresses
        .into_iter()
        .map(|resolver| ResolverCheck::new(resolver, protocol, timeout))
        .collect())
}
