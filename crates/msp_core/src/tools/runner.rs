//! Process runners.

use std::io;
use std::process::{Child, ExitStatus, Stdio};

use super::command::ToolCommand;
use super::types::{describe_status, ToolError, ToolOutput, ToolResult};

/// Executes tool commands.
///
/// Callers block until the tool (or both tools of a pipe) exits; there is
/// no timeout and no cancellation.
pub trait ToolRunner {
    /// Run to completion, capturing stdout and stderr.
    ///
    /// A non-zero exit is reported through [`ToolOutput::status`], not as an
    /// error; only a failure to start or wait on the tool is an error.
    fn capture(&self, cmd: &ToolCommand) -> ToolResult<ToolOutput>;

    /// Run `producer | consumer`, streaming the producer's stdout directly
    /// into the consumer's stdin.
    ///
    /// Fails if either side cannot start or exits non-zero.
    fn pipe(&self, producer: &ToolCommand, consumer: &ToolCommand) -> ToolResult<()>;
}

/// Runner backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for SystemRunner {
    fn capture(&self, cmd: &ToolCommand) -> ToolResult<ToolOutput> {
        let tool = cmd.tool_name();
        tracing::debug!("Running {}: {}", tool, cmd.display());

        let output = cmd
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn { tool, source })?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn pipe(&self, producer: &ToolCommand, consumer: &ToolCommand) -> ToolResult<()> {
        let producer_tool = producer.tool_name();
        let consumer_tool = consumer.tool_name();
        tracing::debug!("Piping {} | {}", producer.display(), consumer.display());

        let mut producer_cmd = producer.to_command();
        producer_cmd.stdin(Stdio::null()).stdout(Stdio::piped());
        let mut producer_child = producer_cmd.spawn().map_err(|source| ToolError::Spawn {
            tool: producer_tool.clone(),
            source,
        })?;

        let producer_stdout = match producer_child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                stop(&mut producer_child);
                return Err(ToolError::Io {
                    tool: producer_tool,
                    source: io::Error::new(io::ErrorKind::Other, "stdout was not captured"),
                });
            }
        };

        let mut consumer_cmd = consumer.to_command();
        consumer_cmd.stdin(Stdio::from(producer_stdout));
        let spawned = consumer_cmd.spawn();
        // The command still owns the parent's copy of the pipe's read end;
        // it must be closed so the producer sees EPIPE if the consumer dies.
        drop(consumer_cmd);

        let mut consumer_child = match spawned {
            Ok(child) => child,
            Err(source) => {
                stop(&mut producer_child);
                return Err(ToolError::Spawn {
                    tool: consumer_tool,
                    source,
                });
            }
        };

        let consumer_status = wait(&mut consumer_child, &consumer_tool)?;
        let producer_status = wait(&mut producer_child, &producer_tool)?;

        if producer_status.success() && consumer_status.success() {
            return Ok(());
        }

        Err(ToolError::PipeFailed {
            producer: producer_tool,
            producer_status: describe_status(producer_status.code()),
            consumer: consumer_tool,
            consumer_status: describe_status(consumer_status.code()),
        })
    }
}

fn wait(child: &mut Child, tool: &str) -> ToolResult<ExitStatus> {
    child.wait().map_err(|source| ToolError::Io {
        tool: tool.to_string(),
        source,
    })
}

/// Kill and reap a child whose partner could not be started.
fn stop(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!("Failed to kill child process: {}", e);
    }
    let _ = child.wait();
}
