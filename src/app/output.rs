//! Reporting alive resolvers.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error_handling::OutputError;
use crate::models::ResolverOutcome;

/// Writes every alive resolver to `path`, one per line, in the given order.
///
/// The file is created or truncated. Returns the number of lines written.
///
/// # Errors
///
/// Returns an `OutputError` if the file cannot be created or written.
pub fn write_alive_resolvers(
    path: &Path,
    outcomes: &[ResolverOutcome],
) -> Result<usize, OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source: io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    let mut written = 0;
    for outcome in outcomes.iter().filter(|o| o.alive) {
        writeln!(writer, "{}", outcome.resolver).map_err(write_err)?;
        written += 1;
    }
    writer.flush().map_err(write_err)?;
    Ok(written)
}

/// Prints an alive resolver to stdout as a single line.
///
/// Workers call this concurrently; holding the stdout lock for the whole line
/// keeps lines from interleaving.
pub fn print_alive(outcome: &ResolverOutcome) {
    let mut stdout = io::stdout().lock();
    // A closed pipe must not abort the batch
    let _ = writeln!(stdout, "{}", outcome.resolver);
}
