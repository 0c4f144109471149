//! Pipeline step trait definition.

use super::errors::StepResult;
use super::types::{Context, FileState, StepOutcome};

/// Trait for pipeline steps.
///
/// The pipeline runner calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work
/// 3. `validate_output` - Verify the step produced valid output
///    (only after `execute` returned `Success`)
pub trait PipelineStep: Send + Sync {
    /// Step name (for logging and error context).
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    fn validate_input(&self, ctx: &Context<'_>) -> StepResult<()>;

    /// Execute the step's main work and record results in `state`.
    ///
    /// Returns `StepOutcome::Skipped` when there is nothing to do for this
    /// file (not an error).
    fn execute(&self, ctx: &Context<'_>, state: &mut FileState) -> StepResult<StepOutcome>;

    /// Validate outputs after execution.
    fn validate_output(&self, ctx: &Context<'_>, state: &FileState) -> StepResult<()>;
}
