//! External tool invocation.
//!
//! Every external program (ffmpeg, the AAC encoder, mkvmerge) is run from a
//! [`ToolCommand`]: a program plus a structured argument vector. Arguments
//! are never joined into a shell string; the quoted form produced by
//! [`ToolCommand::display`] is for logs only.
//!
//! Execution goes through the [`ToolRunner`] trait so the pipeline can be
//! driven by [`SystemRunner`] in production and by a scripted runner in
//! tests.

mod command;
mod runner;
mod types;

pub use command::ToolCommand;
pub use runner::{SystemRunner, ToolRunner};
pub use types::{describe_status, ToolError, ToolOutput, ToolResult};
