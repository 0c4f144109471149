//! Error types for the per-file pipeline.
//!
//! Errors carry context that chains through layers:
//! File → Step → Tool → Detail

use std::io;

use thiserror::Error;

use crate::loudness::LoudnessError;
use crate::tools::ToolError;

/// Pipeline error with file and step context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed while processing a file.
    #[error("'{file}' failed at step '{step_name}': {source}")]
    StepFailed {
        file: String,
        step_name: String,
        #[source]
        source: StepError,
    },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        file: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            file: file.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Whether the whole batch has to stop, not just this file.
    ///
    /// True for untrusted loudness readings only.
    pub fn is_batch_fatal(&self) -> bool {
        match self {
            Self::StepFailed { source, .. } => source.is_batch_fatal(),
        }
    }
}

/// Error from a pipeline step.
#[derive(Error, Debug)]
pub enum StepError {
    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// An external tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Loudness measurement failed or was unusable.
    #[error(transparent)]
    Loudness(#[from] LoudnessError),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl StepError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }

    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, Self::Loudness(e) if e.is_untrusted_measurement())
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
