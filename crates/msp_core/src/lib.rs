//! MSP Core - movie soundtrack preparation.
//!
//! Finds the audio streams of movie files, corrects their loudness,
//! re-encodes them to AAC and remuxes them, driving ffmpeg, an AAC
//! encoder and mkvmerge as external tools. The crate has no CLI
//! concerns; the `movie-sound-prepare` binary is a thin wrapper.

pub mod config;
pub mod inputs;
pub mod logging;
pub mod loudness;
pub mod models;
pub mod mux;
pub mod orchestrator;
pub mod probe;
pub mod tools;
pub mod transcode;

#[cfg(test)]
mod testing;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
