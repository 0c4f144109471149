//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use msp_core::config::Settings;
use msp_core::models::{LanguageFilter, RunContext};

#[derive(Debug, Parser, Clone)]
#[command(name = "movie-sound-prepare", author, version)]
#[command(about = "Normalize, downmix and re-encode movie soundtracks to AAC, then remux")]
#[command(group(ArgGroup::new("layout").args(["channels", "mono", "stereo"])))]
pub struct Cli {
    /// Input movie file or glob pattern ('[' is matched literally)
    #[arg(short, long)]
    pub input: String,

    /// Keep audio tracks in this language ("all" keeps every track)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Write one standalone audio file instead of remuxing
    #[arg(short, long)]
    pub podcast: bool,

    /// Output channel count, 0 = keep layout (5.1 is downmixed to stereo)
    #[arg(short, long, default_value_t = 0)]
    pub channels: u32,

    /// Shorthand for --channels 1
    #[arg(long)]
    pub mono: bool,

    /// Shorthand for --channels 2
    #[arg(long)]
    pub stereo: bool,

    /// Skip loudness measurement and gain correction
    #[arg(long)]
    pub no_gain: bool,

    /// TOML settings file, created with defaults when missing
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print debug output, including captured tool output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Effective channel override.
    pub fn channel_count(&self) -> u32 {
        if self.mono {
            1
        } else if self.stereo {
            2
        } else {
            self.channels
        }
    }

    /// Build the run options, falling back to `settings` for the language.
    pub fn run_context(&self, settings: &Settings) -> RunContext {
        let language = self
            .lang
            .as_deref()
            .unwrap_or(&settings.selection.language);

        RunContext::new(self.input.clone())
            .with_language(LanguageFilter::parse(language))
            .with_undetermined_language(settings.selection.undetermined_language.clone())
            .with_channels(self.channel_count())
            .with_podcast(self.podcast)
            .with_gain(!self.no_gain)
    }
}
