//! Tool execution results and errors.

use std::io;

use thiserror::Error;

/// Captured result of a finished tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured diagnostic output.
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the tool exited with code 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Exit code, or -1 when there is none.
    pub fn exit_code(&self) -> i32 {
        self.status.unwrap_or(-1)
    }
}

/// Errors from running external tools.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program could not be started (missing binary, permissions).
    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The program ran and reported failure.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    Failed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// One or both sides of a `producer | consumer` chain failed.
    #[error("{producer} | {consumer} failed ({producer}: {producer_status}, {consumer}: {consumer_status})")]
    PipeFailed {
        producer: String,
        producer_status: String,
        consumer: String,
        consumer_status: String,
    },

    /// Waiting on or talking to a running tool failed.
    #[error("I/O error while running {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: io::Error,
    },
}

impl ToolError {
    /// Create a failed-tool error.
    pub fn failed(tool: impl Into<String>, exit_code: i32, message: impl Into<String>) -> Self {
        Self::Failed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Human-readable form of an exit status.
pub fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(0) => "ok".to_string(),
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_success_requires_zero() {
        let ok = ToolOutput {
            status: Some(0),
            ..Default::default()
        };
        let failed = ToolOutput {
            status: Some(1),
            ..Default::default()
        };
        let killed = ToolOutput::default();

        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
        assert_eq!(killed.exit_code(), -1);
    }

    #[test]
    fn pipe_error_names_both_sides() {
        let err = ToolError::PipeFailed {
            producer: "ffmpeg".to_string(),
            producer_status: describe_status(Some(0)),
            consumer: "neroAacEnc".to_string(),
            consumer_status: describe_status(Some(2)),
        };
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg: ok"));
        assert!(msg.contains("neroAacEnc: exit code 2"));
    }
}
