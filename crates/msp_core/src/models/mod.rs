//! Data models for movie-sound-prepare.
//!
//! - Stream descriptors produced by discovery and enriched by later stages
//! - Run configuration shared by every stage of one invocation

mod run;
mod stream;

pub use run::{LanguageFilter, RunContext, DEFAULT_LANGUAGE, UNDETERMINED_LANGUAGE};
pub use stream::StreamDescriptor;
