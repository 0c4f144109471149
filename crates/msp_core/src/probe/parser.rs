//! Parser for ffmpeg's audio stream lines.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::StreamDescriptor;

/// Fields of one audio stream line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLine {
    /// Codec name without profile notes.
    pub codec: String,
    /// Language group; `Some("")` when the parentheses are empty.
    pub language: Option<String>,
    /// Channel layout field.
    pub channel_layout: String,
}

impl StreamLine {
    /// Attach a discovery index.
    pub fn into_descriptor(self, index: usize) -> StreamDescriptor {
        StreamDescriptor::new(index, self.codec, self.language, self.channel_layout)
    }
}

// Stream #<file>:<stream>[<[0xid]>][(<lang>)]: Audio: <codec>[ (<note>)...], <rate>, <layout>[, ...]
fn stream_line_regex() -> &'static Regex {
    static STREAM_LINE: OnceLock<Regex> = OnceLock::new();
    STREAM_LINE.get_or_init(|| {
        Regex::new(
            r"Stream #\d+:\d+(?:\[0x[0-9a-fA-F]+\])?(?:\((?P<lang>[^)]*)\))?: Audio: (?P<codec>[A-Za-z0-9_.\-]+)[^,]*, [^,]*, (?P<channels>[^,]+)",
        )
        .expect("stream line pattern is valid")
    })
}

/// Parse one line of probe output.
///
/// Returns `None` for anything that is not an audio stream line; probe
/// output is mostly unrelated text, so this is not an error.
pub fn parse_stream_line(line: &str) -> Option<StreamLine> {
    let caps = stream_line_regex().captures(line)?;

    let channel_layout = caps.name("channels")?.as_str().trim();
    if channel_layout.is_empty() {
        return None;
    }

    Some(StreamLine {
        codec: caps.name("codec")?.as_str().to_string(),
        language: caps.name("lang").map(|m| m.as_str().trim().to_string()),
        channel_layout: channel_layout.to_string(),
    })
}
