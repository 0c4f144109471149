//! In-memory [`ToolRunner`] for tests.
//!
//! Recognises the probe, measurement, decode | encode and mkvmerge
//! invocations by their arguments and answers them from a script, writing
//! the files the real tools would produce.

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use parking_lot::Mutex;

use crate::tools::{ToolCommand, ToolError, ToolOutput, ToolResult, ToolRunner};

const DEFAULT_MEASUREMENT: &str = "\
[Parsed_volumedetect_1 @ 0x5581] n_samples: 1440000
[Parsed_volumedetect_1 @ 0x5581] mean_volume: -24.1 dB
[Parsed_volumedetect_1 @ 0x5581] max_volume: -3.0 dB
";

pub(crate) struct ScriptedRunner {
    probe_output: Option<String>,
    measurements: Mutex<VecDeque<String>>,
    measurement_fails: bool,
    mux_status: i32,
    failing_streams: Vec<usize>,
    failing_inputs: Vec<String>,
    commands: Mutex<Vec<ToolCommand>>,
    pipes: Mutex<Vec<(ToolCommand, ToolCommand)>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self {
            probe_output: Some(String::new()),
            measurements: Mutex::new(VecDeque::new()),
            measurement_fails: false,
            mux_status: 0,
            failing_streams: Vec::new(),
            failing_inputs: Vec::new(),
            commands: Mutex::new(Vec::new()),
            pipes: Mutex::new(Vec::new()),
        }
    }

    /// Diagnostic text printed by every probe.
    pub(crate) fn with_probe_output(mut self, text: &str) -> Self {
        self.probe_output = Some(text.to_string());
        self
    }

    /// Probing fails to start, as with a missing binary.
    pub(crate) fn with_missing_probe(mut self) -> Self {
        self.probe_output = None;
        self
    }

    /// Queue the diagnostic text of the next measurement pass.
    ///
    /// Once the queue is empty a -3.0 dB peak is reported.
    pub(crate) fn with_measurement(self, text: &str) -> Self {
        self.measurements.lock().push_back(text.to_string());
        self
    }

    pub(crate) fn with_failing_measurement(mut self) -> Self {
        self.measurement_fails = true;
        self
    }

    pub(crate) fn with_mux_status(mut self, status: i32) -> Self {
        self.mux_status = status;
        self
    }

    /// The decode | encode pipe of this audio index fails.
    pub(crate) fn with_failing_stream(mut self, index: usize) -> Self {
        self.failing_streams.push(index);
        self
    }

    /// Every pipe reading an input whose path contains `name` fails.
    pub(crate) fn with_failing_input(mut self, name: &str) -> Self {
        self.failing_inputs.push(name.to_string());
        self
    }

    /// Every captured command, in order.
    pub(crate) fn commands(&self) -> Vec<ToolCommand> {
        self.commands.lock().clone()
    }

    /// Every pipe, in order.
    pub(crate) fn pipes(&self) -> Vec<(ToolCommand, ToolCommand)> {
        self.pipes.lock().clone()
    }

    fn probe(&self, cmd: &ToolCommand) -> ToolResult<ToolOutput> {
        match &self.probe_output {
            Some(text) => Ok(ToolOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: text.clone(),
            }),
            None => Err(ToolError::Spawn {
                tool: cmd.tool_name(),
                source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
            }),
        }
    }

    fn measure(&self) -> ToolOutput {
        if self.measurement_fails {
            return ToolOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "Stream map '0:a:9' matches no streams.\n".to_string(),
            };
        }
        let stderr = self
            .measurements
            .lock()
            .pop_front()
            .unwrap_or_else(|| DEFAULT_MEASUREMENT.to_string());
        ToolOutput {
            status: Some(0),
            stdout: String::new(),
            stderr,
        }
    }

    fn mux(&self, cmd: &ToolCommand) -> ToolResult<ToolOutput> {
        if self.mux_status < 2 {
            if let Some(output) = cmd.value_after("-o") {
                write_file(cmd, Path::new(output), "muxed")?;
            }
        }
        let stderr = if self.mux_status >= 2 {
            "Error: The file could not be opened for reading.\n".to_string()
        } else {
            String::new()
        };
        Ok(ToolOutput {
            status: Some(self.mux_status),
            stdout: "Multiplexing took 1 second.\n".to_string(),
            stderr,
        })
    }
}

fn write_file(cmd: &ToolCommand, path: &Path, contents: &str) -> ToolResult<()> {
    std::fs::write(path, contents).map_err(|source| ToolError::Io {
        tool: cmd.tool_name(),
        source,
    })
}

fn mapped_index(cmd: &ToolCommand) -> Option<usize> {
    cmd.value_after("-map")?
        .to_string_lossy()
        .rsplit(':')
        .next()?
        .parse()
        .ok()
}

impl ToolRunner for ScriptedRunner {
    fn capture(&self, cmd: &ToolCommand) -> ToolResult<ToolOutput> {
        self.commands.lock().push(cmd.clone());

        if cmd.value_after("-o").is_some() {
            return self.mux(cmd);
        }
        let is_measurement = cmd
            .get_args()
            .iter()
            .any(|arg| arg.to_string_lossy().contains("volumedetect"));
        if is_measurement {
            Ok(self.measure())
        } else {
            self.probe(cmd)
        }
    }

    fn pipe(&self, producer: &ToolCommand, consumer: &ToolCommand) -> ToolResult<()> {
        self.pipes.lock().push((producer.clone(), consumer.clone()));

        let input = producer
            .value_after("-i")
            .map(|i| i.to_string_lossy().to_string())
            .unwrap_or_default();
        let index_fails = mapped_index(producer).is_some_and(|i| self.failing_streams.contains(&i));
        let input_fails = self.failing_inputs.iter().any(|name| input.contains(name));
        if index_fails || input_fails {
            return Err(ToolError::PipeFailed {
                producer: producer.tool_name(),
                producer_status: "exit code 1".to_string(),
                consumer: consumer.tool_name(),
                consumer_status: "exit code 1".to_string(),
            });
        }

        let contents = producer
            .value_after("-map")
            .map(|m| m.to_string_lossy().to_string())
            .unwrap_or_default();
        match consumer.value_after("-of") {
            Some(output) => write_file(consumer, Path::new(output), &contents),
            None => Ok(()),
        }
    }
}
