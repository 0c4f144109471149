//! Structured command lines.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

/// A program and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Start a command for the given program name or path.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    /// The program as given.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// The argument vector.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Value following `flag` in the argument vector, if any.
    pub fn value_after(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|pos| self.args.get(pos + 1))
            .map(|value| value.as_os_str())
    }

    /// Short tool name for messages (file stem of the program).
    pub fn tool_name(&self) -> String {
        Path::new(&self.program)
            .file_stem()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .to_string()
    }

    /// Shell-like rendering for logs.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| quote_for_display(&part.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build a `std::process::Command` with the same program and arguments.
    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Quote an argument for display when it would not read as one word.
fn quote_for_display(part: &str) -> String {
    let needs_quotes = part.is_empty()
        || part
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'' || c == '|' || c == ';');

    if !needs_quotes {
        return part.to_string();
    }

    let escaped = part.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
