//! Core types for the per-file pipeline.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::logging::RunLogger;
use crate::models::{RunContext, StreamDescriptor};
use crate::tools::ToolRunner;

/// Read-only context passed to pipeline steps.
///
/// Everything a step may read but not modify for one input file. Mutable
/// results go in `FileState`.
pub struct Context<'a> {
    /// Invocation options (language, channels, podcast).
    pub run: &'a RunContext,
    /// Application settings.
    pub settings: &'a Settings,
    /// The input file being processed.
    pub input_path: PathBuf,
    /// Console logger.
    pub logger: &'a RunLogger,
    /// Executes external tools.
    pub runner: &'a dyn ToolRunner,
}

impl<'a> Context<'a> {
    pub fn new(
        run: &'a RunContext,
        settings: &'a Settings,
        input_path: impl Into<PathBuf>,
        logger: &'a RunLogger,
        runner: &'a dyn ToolRunner,
    ) -> Self {
        Self {
            run,
            settings,
            input_path: input_path.into(),
            logger,
            runner,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input_path
    }

    /// Input path as shown in messages.
    pub fn input_name(&self) -> String {
        self.input_path.display().to_string()
    }

    /// Directory for per-stream artifacts.
    pub fn temp_dir(&self) -> PathBuf {
        PathBuf::from(&self.settings.encoding.temp_dir)
    }

    /// Whether the loudness pass runs (CLI flag and configuration).
    pub fn apply_gain(&self) -> bool {
        self.run.apply_gain && self.settings.encoding.apply_gain
    }
}

/// Mutable state that accumulates results for one input file.
#[derive(Debug, Clone, Default)]
pub struct FileState {
    /// Selected audio streams, enriched with gain and artifact path.
    pub streams: Vec<StreamDescriptor>,
    /// Per-stream artifacts created so far, in stream order.
    pub temp_files: Vec<PathBuf>,
    /// Final output (muxed container or podcast audio).
    pub output: Option<PathBuf>,
}

impl FileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_streams(&self) -> bool {
        !self.streams.is_empty()
    }
}

/// Outcome of a step execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (with reason).
    Skipped(String),
}
