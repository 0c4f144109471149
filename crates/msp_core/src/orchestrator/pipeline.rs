//! Pipeline runner that executes steps in sequence.

use crate::logging::{LogLevel, MessagePrefix};

use super::errors::{PipelineError, PipelineResult};
use super::step::PipelineStep;
use super::types::{Context, FileState, StepOutcome};

/// Pipeline that runs a sequence of steps for one input file.
///
/// Steps run in order with validation before and after each one. The
/// first failure stops the pipeline.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the pipeline.
    pub fn add_step<S: PipelineStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Run every step against `ctx`, recording results in `state`.
    ///
    /// `state` keeps whatever earlier steps recorded even when a later
    /// step fails, so the caller can still clean up.
    pub fn run(&self, ctx: &Context<'_>, state: &mut FileState) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult {
            steps_completed: Vec::new(),
            steps_skipped: Vec::new(),
        };

        for step in &self.steps {
            let step_name = step.name();
            ctx.logger
                .log(LogLevel::Debug, &MessagePrefix::Phase.format(step_name));

            if let Err(e) = step.validate_input(ctx) {
                ctx.logger.error(&format!("Input validation failed: {}", e));
                return Err(PipelineError::step_failed(ctx.input_name(), step_name, e));
            }

            let outcome = step.execute(ctx, state).map_err(|e| {
                ctx.logger.error(&format!("{} failed: {}", step_name, e));
                PipelineError::step_failed(ctx.input_name(), step_name, e)
            })?;

            match outcome {
                StepOutcome::Success => {
                    if let Err(e) = step.validate_output(ctx, state) {
                        ctx.logger.error(&format!("Output validation failed: {}", e));
                        return Err(PipelineError::step_failed(ctx.input_name(), step_name, e));
                    }
                    ctx.logger.debug(&format!("{} completed", step_name));
                    result.steps_completed.push(step_name.to_string());
                }
                StepOutcome::Skipped(reason) => {
                    ctx.logger.info(&format!("{} skipped: {}", step_name, reason));
                    result.steps_skipped.push(step_name.to_string());
                }
            }
        }

        Ok(result)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Steps that completed successfully.
    pub steps_completed: Vec<String>,
    /// Steps that were skipped.
    pub steps_skipped: Vec<String>,
}
