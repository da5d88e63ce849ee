//! Read a stock feed from disk.

use std::path::Path;

use crate::LoadError;

/// Read all transaction lines of the feed at `path`, in order. Blank lines are skipped.
///
/// The whole feed is read before returning, so that transactions can be processed strictly in
/// sequence afterwards.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_owned()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let lines: Vec<String> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect();

    if lines.is_empty() {
        return Err(LoadError::Empty(path.to_owned()));
    }
    tracing::debug!(path = %path.display(), lines = lines.len(), "loaded feed");
    Ok(lines)
}
