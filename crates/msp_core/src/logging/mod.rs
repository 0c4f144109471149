//! Logging infrastructure for movie-sound-prepare.
//!
//! This module provides:
//! - A console [`RunLogger`] for progress and command lines
//! - Tail buffer for diagnosing failed tools
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```no_run
//! use msp_core::logging::{LogConfig, RunLogger};
//!
//! let logger = RunLogger::stdout(LogConfig::default());
//! logger.info("Processing movie.mkv");
//! logger.command("ffmpeg -hide_banner -i movie.mkv");
//! ```

mod run_logger;
mod types;

#[cfg(test)]
pub(crate) use run_logger::capturing_logger;
pub use run_logger::RunLogger;
pub use types::{LogConfig, LogLevel, LogSink, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr, keeping stdout for the run's progress lines
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }
}
