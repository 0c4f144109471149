//! Console logger for batch runs.
//!
//! Prints progress and every constructed command to a sink (stdout by
//! default) and keeps a tail of captured tool output for error diagnosis.
//! Internal diagnostics go through `tracing` instead.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, LogSink, MessagePrefix};

/// Console logger shared by every stage of a run.
pub struct RunLogger {
    /// Where formatted lines go.
    sink: LogSink,
    /// Logging configuration.
    config: LogConfig,
    /// Recent tool output lines.
    tail_buffer: Arc<Mutex<VecDeque<String>>>,
}

impl RunLogger {
    /// Create a logger that prints to stdout.
    pub fn stdout(config: LogConfig) -> Self {
        Self::with_sink(config, Box::new(|line| println!("{}", line)))
    }

    /// Create a logger with a custom sink.
    pub fn with_sink(config: LogConfig, sink: LogSink) -> Self {
        let capacity = config.error_tail;
        Self {
            sink,
            config,
            tail_buffer: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }
        (self.sink)(message);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Print a progress line ("Processing ...", "Done.") at any level.
    pub fn progress(&self, message: &str) {
        (self.sink)(message);
    }

    /// Print a command line about to be executed, at any level.
    pub fn command(&self, command: &str) {
        self.progress(&MessagePrefix::Command.format(command));
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Record captured tool output.
    ///
    /// Lines only reach the console at debug level; they always go to the
    /// tail buffer.
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        if self.config.error_tail > 0 {
            let mut buffer = self.tail_buffer.lock();
            if buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            buffer.push_back(line.to_string());
        }

        let prefix = if is_stderr { "[stderr] " } else { "" };
        self.debug(&format!("{}{}", prefix, line));
    }

    /// Record every line of a tool's captured output.
    pub fn output_text(&self, text: &str, is_stderr: bool) {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            self.output_line(line, is_stderr);
        }
    }

    /// Print the tail buffer (typically after an error).
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }

        self.log(LogLevel::Error, &format!("[{}/tail]", header));
        for line in buffer.iter() {
            self.log(LogLevel::Error, line);
        }
    }

    /// Clear the tail buffer.
    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    /// Get the current tail buffer contents.
    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }
}

#[cfg(test)]
pub(crate) fn capturing_logger(config: LogConfig) -> (RunLogger, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink_lines = Arc::clone(&lines);
    let logger = RunLogger::with_sink(
        config,
        Box::new(move |line| sink_lines.lock().push(line.to_string())),
    );
    (logger, lines)
}
