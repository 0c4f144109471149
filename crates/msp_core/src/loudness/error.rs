//! Loudness measurement errors.

use thiserror::Error;

use crate::tools::ToolError;

/// Errors from the loudness pass.
#[derive(Error, Debug)]
pub enum LoudnessError {
    /// The measurement did not report exactly one peak value.
    #[error("Expected exactly one max_volume value in measurement output, found {found}")]
    AmbiguousMeasurement { found: usize },

    /// The reported value is not a number.
    #[error("Unreadable max_volume value '{value}'")]
    InvalidValue { value: String },

    /// The measurement tool failed.
    #[error("Loudness measurement failed: {0}")]
    Tool(#[from] ToolError),
}

impl LoudnessError {
    /// Whether this error means the measurement itself cannot be trusted.
    ///
    /// Such errors stop the whole batch rather than just the current file.
    pub fn is_untrusted_measurement(&self) -> bool {
        matches!(
            self,
            LoudnessError::AmbiguousMeasurement { .. } | LoudnessError::InvalidValue { .. }
        )
    }
}

/// Result type for loudness operations.
pub type LoudnessResult<T> = Result<T, LoudnessError>;
