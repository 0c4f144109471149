//! Settings struct with TOML-based sections.
//!
//! Every field has a default, so a partial file (or no file at all) yields
//! a complete configuration.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::{DEFAULT_LANGUAGE, UNDETERMINED_LANGUAGE};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// External program names or paths.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Stream selection defaults.
    #[serde(default)]
    pub selection: SelectionSettings,

    /// Loudness and AAC encoding.
    #[serde(default)]
    pub encoding: EncodingSettings,

    /// Output naming and tagging.
    #[serde(default)]
    pub output: OutputSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Names of the TOML tables this struct understands.
    pub const SECTIONS: [&'static str; 5] = ["tools", "selection", "encoding", "output", "logging"];
}

/// External tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Probe, decode and loudness measurement.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    /// AAC encoder reading WAV from stdin.
    #[serde(default = "default_aac_encoder")]
    pub aac_encoder: String,

    /// Matroska muxer.
    #[serde(default = "default_mkvmerge")]
    pub mkvmerge: String,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_aac_encoder() -> String {
    "neroAacEnc".to_string()
}

fn default_mkvmerge() -> String {
    "mkvmerge".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            aac_encoder: default_aac_encoder(),
            mkvmerge: default_mkvmerge(),
        }
    }
}

/// Stream selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSettings {
    /// Language used when `--lang` is not given ("all" disables filtering).
    #[serde(default = "default_language")]
    pub language: String,

    /// Tag always accepted next to the requested language.
    #[serde(default = "default_undetermined_language")]
    pub undetermined_language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_undetermined_language() -> String {
    UNDETERMINED_LANGUAGE.to_string()
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            undetermined_language: default_undetermined_language(),
        }
    }
}

/// Loudness correction and AAC encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingSettings {
    /// Encoder quality (`-q`).
    #[serde(default = "default_aac_quality")]
    pub aac_quality: f64,

    /// Measure peak level and apply a gain correction.
    #[serde(default = "default_true")]
    pub apply_gain: bool,

    /// Directory for per-stream artifacts.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,
}

fn default_aac_quality() -> f64 {
    0.42
}

fn default_true() -> bool {
    true
}

fn default_temp_dir() -> String {
    ".".to_string()
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            aac_quality: default_aac_quality(),
            apply_gain: true,
            temp_dir: default_temp_dir(),
        }
    }
}

/// Output naming and tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Appended to the input's file stem.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Extension of the remuxed container.
    #[serde(default = "default_mux_extension")]
    pub mux_extension: String,

    /// Extension of the podcast-mode audio file.
    #[serde(default = "default_podcast_extension")]
    pub podcast_extension: String,

    /// Language tag written on every new audio track.
    #[serde(default = "default_audio_language")]
    pub audio_language: String,
}

fn default_suffix() -> String {
    "_aac".to_string()
}

fn default_mux_extension() -> String {
    "mkv".to_string()
}

fn default_podcast_extension() -> String {
    "m4a".to_string()
}

fn default_audio_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            mux_extension: default_mux_extension(),
            podcast_extension: default_podcast_extension(),
            audio_language: default_audio_language(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level for diagnostics (overridden by `RUST_LOG`).
    #[serde(default)]
    pub level: LogLevel,

    /// Number of captured tool output lines shown when a tool fails.
    #[serde(default = "default_error_tail")]
    pub error_tail: usize,
}

fn default_error_tail() -> usize {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            error_tail: default_error_tail(),
        }
    }
}
