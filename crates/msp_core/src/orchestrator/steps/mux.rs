//! Mux step - merges encoded streams into the output container with mkvmerge.

use crate::mux::{mux_output_path, run_mkvmerge, MkvmergeOptionsBuilder};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, FileState, StepOutcome};

/// Mux step for merging the encoded streams with mkvmerge.
///
/// Skipped in podcast mode and when nothing was encoded.
#[derive(Debug, Default)]
pub struct MuxStep;

impl MuxStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for MuxStep {
    fn name(&self) -> &str {
        "Mux"
    }

    fn validate_input(&self, _ctx: &Context<'_>) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context<'_>, state: &mut FileState) -> StepResult<StepOutcome> {
        if ctx.run.podcast {
            return Ok(StepOutcome::Skipped("podcast mode".to_string()));
        }
        if state.temp_files.is_empty() {
            ctx.logger
                .warn("No encoded audio streams, leaving the input untouched");
            return Ok(StepOutcome::Skipped("no encoded audio streams".to_string()));
        }

        let output_path = mux_output_path(ctx.input(), &ctx.settings.output);
        let tokens = MkvmergeOptionsBuilder::new(ctx.input(), &output_path, &state.temp_files)
            .with_language(&ctx.settings.output.audio_language)
            .build();

        run_mkvmerge(
            ctx.runner,
            &ctx.settings.tools.mkvmerge,
            &tokens,
            ctx.logger,
        )?;

        ctx.logger.success(&format!(
            "Merged to: {}",
            output_path.file_name().unwrap_or_default().to_string_lossy()
        ));
        state.output = Some(output_path);

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context<'_>, state: &FileState) -> StepResult<()> {
        let output = state
            .output
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Mux output not recorded"))?;

        if !output.exists() {
            return Err(StepError::invalid_output(format!(
                "Output file not created: {}",
                output.display()
            )));
        }

        Ok(())
    }
}
