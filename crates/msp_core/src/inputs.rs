//! Input file expansion.
//!
//! The `--input` value is a glob pattern in which `[` is always literal,
//! so names like `[2019] Film.mkv` match themselves.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from expanding the input pattern.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid input pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Make every `[` literal (`[` becomes `[[]`).
pub fn escape_brackets(pattern: &str) -> String {
    pattern.replace('[', "[[]")
}

/// Expand the pattern to existing files, sorted by path.
///
/// Entries that cannot be read are skipped.
pub fn expand_input_pattern(pattern: &str) -> Result<Vec<PathBuf>, InputError> {
    let escaped = escape_brackets(pattern);
    let paths = glob::glob(&escaped).map_err(|source| InputError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable path {}: {}", e.path().display(), e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    tracing::debug!("Pattern '{}' matched {} file(s)", pattern, files.len());
    Ok(files)
}
