//! Output file names.

use std::path::{Path, PathBuf};

use crate::config::OutputSettings;

/// `<dir>/<stem><suffix>.<extension>` next to the input.
///
/// An empty suffix that would reproduce the input path falls back to
/// `_aac`, so the input is never overwritten.
pub fn output_path_with_suffix(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let candidate = input.with_file_name(format!("{}{}.{}", stem, suffix, extension));
    if candidate == input {
        input.with_file_name(format!("{}_aac.{}", stem, extension))
    } else {
        candidate
    }
}

/// Remuxed container path (`movie.mp4` -> `movie_aac.mkv`).
pub fn mux_output_path(input: &Path, output: &OutputSettings) -> PathBuf {
    output_path_with_suffix(input, &output.suffix, &output.mux_extension)
}

/// Standalone audio path for podcast mode (`movie.mkv` -> `movie_aac.m4a`).
pub fn podcast_output_path(input: &Path, output: &OutputSettings) -> PathBuf {
    output_path_with_suffix(input, &output.suffix, &output.podcast_extension)
}
