//! Decode, gain and AAC encode of single audio streams.
//!
//! Every stream is transcoded by two chained processes:
//!
//! ```text
//! ffmpeg -i <in> -map 0:a:<n> -af aresample=async=1,volume=+x.ydB [-ac N] -f wav -
//!     | neroAacEnc -q 0.42 -ignorelength -if - -of <out>
//! ```
//!
//! The channel rule in [`channel_setting`] is shared with the loudness
//! pass so measurement and encode always operate on the same layout.

mod channels;
mod encoder;
mod temp_names;

pub use channels::{channel_args, channel_setting, DOWNMIX_CHANNELS};
pub use encoder::{
    audio_input_args, decode_command, encode_command, filter_chain, transcode_stream,
    volume_filter, TranscodeRequest,
};
pub use temp_names::{generate_temp_name, stream_temp_path, TEMP_EXTENSION};
