//! Peak-level measurement and gain correction.
//!
//! Each selected stream is decoded once through ffmpeg's `volumedetect`
//! filter with output discarded. The single `max_volume` value it reports
//! becomes the gain that lifts the peak to full scale:
//!
//! ```text
//! [Parsed_volumedetect_1 @ 0x...] max_volume: -4.2 dB  ->  volume=+4.2dB
//! ```
//!
//! A measurement that reports no value or more than one value is never
//! used; it stops the run.

mod error;
mod estimator;

pub use error::{LoudnessError, LoudnessResult};
pub use estimator::{estimate_gain, gain_correction, measurement_command, parse_max_volume};
