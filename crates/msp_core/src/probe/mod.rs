//! Audio stream discovery.
//!
//! The probe runs `ffmpeg -hide_banner -i <input>` and reads the stream
//! listing ffmpeg prints on stderr:
//!
//! ```text
//! Stream #0:1(eng): Audio: ac3, 48000 Hz, 5.1(side), fltp, 640 kb/s (default)
//! Stream #0:2(fre): Audio: aac (LC), 48000 Hz, stereo, fltp, 128 kb/s
//! ```
//!
//! Each audio line becomes a [`StreamDescriptor`](crate::models::StreamDescriptor)
//! whose index is its position among all parsed audio lines. Language
//! filtering keeps those indices, so `-map 0:a:<index>` still addresses the
//! right track after streams were dropped.

mod discovery;
mod parser;

pub use discovery::{
    discover, filter_by_language, probe_command, probe_streams, scan_probe_output,
    FilterDecision, FilteredStreams, ProbeOutcome,
};
pub use parser::{parse_stream_line, StreamLine};
