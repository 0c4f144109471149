//! Unique names for per-stream artifacts.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, SecondsFormat};

/// Extension of encoded per-stream artifacts (the encoder writes MP4 audio).
pub const TEMP_EXTENSION: &str = "m4a";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate `<dir>/<prefix>_<hash>.<extension>`.
///
/// The hash covers the wall-clock time, the process id and a process-wide
/// counter, so repeated calls and concurrent runs get distinct names.
pub fn generate_temp_name(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    let seed = format!(
        "{}|{}|{}",
        Local::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let digest = md5::compute(seed.as_bytes());
    dir.join(format!("{}_{:x}.{}", prefix, digest, extension))
}

/// Artifact path for one stream (`stream<index>_<hash>.m4a`).
pub fn stream_temp_path(dir: &Path, index: usize) -> PathBuf {
    generate_temp_name(dir, &format!("stream{}", index), TEMP_EXTENSION)
}
