//! Audio stream descriptors.

use std::path::PathBuf;

/// One audio track found in an input file.
///
/// Created by discovery, then enriched in place by the loudness pass
/// (`gain_db`) and the encoder (`temp_file`).
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    /// Position among all audio streams of the container, in probe order.
    ///
    /// Assigned before language filtering, so a filtered list may have
    /// gaps. This is the `N` of `-map 0:a:N`.
    pub index: usize,
    /// Codec as printed by the probe (e.g., "aac", "ac3").
    pub codec: String,
    /// Language group as printed by the probe.
    ///
    /// `None` when the group is absent, `Some("")` when it is present but
    /// empty. Use [`StreamDescriptor::language_tag`] to treat both alike.
    pub language: Option<String>,
    /// Channel layout text (e.g., "5.1(side)", "stereo").
    pub channel_layout: String,
    /// Gain correction in dB, set by the loudness pass.
    pub gain_db: Option<f64>,
    /// Encoded per-stream artifact, set by the encoder outside podcast mode.
    pub temp_file: Option<PathBuf>,
}

impl StreamDescriptor {
    /// Create a descriptor with no gain and no artifact yet.
    pub fn new(
        index: usize,
        codec: impl Into<String>,
        language: Option<String>,
        channel_layout: impl Into<String>,
    ) -> Self {
        Self {
            index,
            codec: codec.into(),
            language,
            channel_layout: channel_layout.into(),
            gain_db: None,
            temp_file: None,
        }
    }

    /// Language tag, with an empty group treated as no tag.
    pub fn language_tag(&self) -> Option<&str> {
        self.language.as_deref().filter(|lang| !lang.is_empty())
    }

    /// Short description for progress output.
    pub fn display_name(&self) -> String {
        format!(
            "audio stream {} ({}, {}, {})",
            self.index,
            self.codec,
            self.language_tag().unwrap_or("no language"),
            self.channel_layout
        )
    }
}
