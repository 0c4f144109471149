//! Per-file pipeline and batch driver.
//!
//! # Architecture
//!
//! ```text
//! run_batch (glob expansion, one file at a time)
//!     └── Pipeline
//!         ├── Step: Discover  (probe, language filter)
//!         ├── Step: Encode    (loudness, decode | encode per stream)
//!         └── Step: Mux       (mkvmerge, skipped in podcast mode)
//!     └── temp file cleanup
//! ```

mod batch;
mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

pub use batch::{run_batch, BatchProcessor, BatchReport, FileFailure, SkippedStep};
pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{DiscoverStep, EncodeStep, MuxStep};
pub use types::{Context, FileState, StepOutcome};

/// Create the standard pipeline: Discover, Encode, Mux.
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(DiscoverStep::new())
        .with_step(EncodeStep::new())
        .with_step(MuxStep::new())
}
