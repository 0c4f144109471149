//! Discover step - probes the input and selects audio streams.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, FileState, StepOutcome};
use crate::probe::discover;

/// Probe the input and keep the streams matching the language filter.
///
/// A failed probe is not an error: the file simply has no streams.
#[derive(Debug, Default)]
pub struct DiscoverStep;

impl DiscoverStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for DiscoverStep {
    fn name(&self) -> &str {
        "Discover"
    }

    fn validate_input(&self, ctx: &Context<'_>) -> StepResult<()> {
        if !ctx.input().is_file() {
            return Err(StepError::invalid_input(format!(
                "Input file not found: {}",
                ctx.input_name()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context<'_>, state: &mut FileState) -> StepResult<StepOutcome> {
        state.streams = discover(
            ctx.runner,
            &ctx.settings.tools.ffmpeg,
            ctx.input(),
            &ctx.run.language,
            &ctx.run.undetermined_language,
            ctx.logger,
        );

        if state.streams.is_empty() {
            ctx.logger.warn("No audio streams found");
        }
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context<'_>, _state: &FileState) -> StepResult<()> {
        Ok(())
    }
}
