//! Batch processing of every input file through the pipeline.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::inputs::expand_input_pattern;
use crate::logging::RunLogger;
use crate::models::RunContext;
use crate::mux::delete_temp_files;
use crate::tools::ToolRunner;

use super::errors::PipelineResult;
use super::pipeline::{Pipeline, PipelineRunResult};
use super::types::{Context, FileState};
use super::create_standard_pipeline;

/// A file that could not be processed.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: String,
}

/// A step that had nothing to do for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStep {
    pub input: PathBuf,
    pub step: String,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Files that went through the pipeline without error.
    pub processed: Vec<PathBuf>,
    /// Files whose processing failed.
    pub failed: Vec<FileFailure>,
    /// Outputs written (muxed containers or podcast files).
    pub outputs: Vec<PathBuf>,
    /// Steps skipped for successfully processed files.
    pub skipped: Vec<SkippedStep>,
    /// Why the batch stopped early, if it did.
    pub aborted: Option<String>,
}

impl BatchReport {
    /// True when every file succeeded and the batch ran to the end.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.aborted.is_none()
    }
}

/// Runs input files one after another through a [`Pipeline`].
pub struct BatchProcessor<'a> {
    settings: &'a Settings,
    runner: &'a dyn ToolRunner,
    logger: &'a RunLogger,
    pipeline: Pipeline,
}

impl<'a> BatchProcessor<'a> {
    /// Processor with the standard Discover, Encode, Mux pipeline.
    pub fn new(settings: &'a Settings, runner: &'a dyn ToolRunner, logger: &'a RunLogger) -> Self {
        Self::with_pipeline(settings, runner, logger, create_standard_pipeline())
    }

    pub fn with_pipeline(
        settings: &'a Settings,
        runner: &'a dyn ToolRunner,
        logger: &'a RunLogger,
        pipeline: Pipeline,
    ) -> Self {
        Self {
            settings,
            runner,
            logger,
            pipeline,
        }
    }

    /// Process one input file.
    ///
    /// Temp files recorded by the pipeline are removed afterwards whether
    /// or not it succeeded.
    pub fn process_file(
        &self,
        run: &RunContext,
        input: &Path,
    ) -> PipelineResult<(FileState, PipelineRunResult)> {
        self.logger.progress(&format!("Processing {}", input.display()));
        self.logger.clear_tail();

        let ctx = Context::new(run, self.settings, input, self.logger, self.runner);
        let mut state = FileState::new();
        let result = self.pipeline.run(&ctx, &mut state);

        if !state.temp_files.is_empty() {
            let cleanup = delete_temp_files(&state.temp_files, self.logger);
            tracing::debug!(
                removed = cleanup.removed.len(),
                failed = cleanup.failed.len(),
                "temp file cleanup"
            );
        }

        result.map(|steps| (state, steps))
    }

    /// Process every input in order.
    ///
    /// A failing file is recorded and the batch moves on; an untrusted
    /// loudness measurement stops the batch.
    pub fn process_all(&self, run: &RunContext, inputs: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();

        for input in inputs {
            match self.process_file(run, input) {
                Ok((state, steps)) => {
                    tracing::debug!(
                        input = %input.display(),
                        completed = ?steps.steps_completed,
                        "file processed"
                    );
                    report
                        .skipped
                        .extend(steps.steps_skipped.into_iter().map(|step| SkippedStep {
                            input: input.clone(),
                            step,
                        }));
                    report.processed.push(input.clone());
                    report.outputs.extend(state.output);
                }
                Err(e) => {
                    tracing::warn!(input = %input.display(), error = %e, "file failed");
                    let fatal = e.is_batch_fatal();
                    report.failed.push(FileFailure {
                        input: input.clone(),
                        error: e.to_string(),
                    });
                    if fatal {
                        self.logger.error(&format!("Stopping batch: {}", e));
                        report.aborted = Some(e.to_string());
                        break;
                    }
                }
            }
        }

        report
    }
}

/// Expand `run.input`, process every match and print the final "Done.".
pub fn run_batch(
    run: &RunContext,
    settings: &Settings,
    runner: &dyn ToolRunner,
    logger: &RunLogger,
) -> BatchReport {
    let report = match expand_input_pattern(&run.input) {
        Ok(inputs) => {
            if inputs.is_empty() {
                logger.warn(&format!("No files match '{}'", run.input));
            }
            BatchProcessor::new(settings, runner, logger).process_all(run, &inputs)
        }
        Err(e) => {
            logger.error(&e.to_string());
            BatchReport {
                aborted: Some(e.to_string()),
                ..BatchReport::default()
            }
        }
    };

    logger.progress("Done.");
    report
}
