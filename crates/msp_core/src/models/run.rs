//! Run configuration for one invocation.

use std::fmt;

/// Language requested when neither the command line nor the config names one.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Tag meaning "undetermined"; always accepted next to the requested language.
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Which audio streams to keep, by language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageFilter {
    /// Keep every stream.
    All,
    /// Keep streams tagged with this language (or undetermined).
    Only(String),
}

impl LanguageFilter {
    /// Parse a command-line value; `"all"` disables filtering.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            LanguageFilter::All
        } else {
            LanguageFilter::Only(value.to_string())
        }
    }
}

impl Default for LanguageFilter {
    fn default() -> Self {
        LanguageFilter::Only(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => write!(f, "all"),
            LanguageFilter::Only(lang) => write!(f, "{}", lang),
        }
    }
}

/// One invocation's configuration.
///
/// Built once from the command line and config, then passed by reference
/// to every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    /// Input path or glob pattern.
    pub input: String,
    /// Language selection.
    pub language: LanguageFilter,
    /// Tag accepted alongside the requested language.
    pub undetermined_language: String,
    /// Forced channel count, 0 = automatic.
    pub channels: u32,
    /// Write one standalone audio file instead of remuxing.
    pub podcast: bool,
    /// Measure loudness and apply a gain correction while encoding.
    pub apply_gain: bool,
}

impl RunContext {
    /// Create a run context with default selection and encoding options.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            language: LanguageFilter::default(),
            undetermined_language: UNDETERMINED_LANGUAGE.to_string(),
            channels: 0,
            podcast: false,
            apply_gain: true,
        }
    }

    /// Set the language filter.
    pub fn with_language(mut self, language: LanguageFilter) -> Self {
        self.language = language;
        self
    }

    /// Set the tag accepted alongside the requested language.
    pub fn with_undetermined_language(mut self, tag: impl Into<String>) -> Self {
        self.undetermined_language = tag.into();
        self
    }

    /// Set the forced channel count (0 = automatic).
    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = channels;
        self
    }

    /// Enable or disable podcast mode.
    pub fn with_podcast(mut self, podcast: bool) -> Self {
        self.podcast = podcast;
        self
    }

    /// Enable or disable the loudness pass.
    pub fn with_gain(mut self, apply_gain: bool) -> Self {
        self.apply_gain = apply_gain;
        self
    }
}
