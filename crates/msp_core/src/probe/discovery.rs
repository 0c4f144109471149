//! Probe invocation and language filtering.

use std::collections::BTreeSet;
use std::path::Path;

use crate::logging::RunLogger;
use crate::models::{LanguageFilter, StreamDescriptor};
use crate::tools::{describe_status, ToolCommand, ToolError, ToolRunner};

use super::parser::parse_stream_line;

/// Result of running the probe.
///
/// All three cases lead to "continue with whatever list resulted": a file
/// whose streams cannot be listed is not fatal to the batch.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The probe listed at least one audio stream.
    Streams(Vec<StreamDescriptor>),
    /// The probe ran but no audio stream line could be parsed.
    NoStreams,
    /// The probe could not be run at all.
    ToolError(ToolError),
}

impl ProbeOutcome {
    /// The discovered streams (empty for `NoStreams` and `ToolError`).
    pub fn into_streams(self) -> Vec<StreamDescriptor> {
        match self {
            ProbeOutcome::Streams(streams) => streams,
            ProbeOutcome::NoStreams | ProbeOutcome::ToolError(_) => Vec::new(),
        }
    }
}

/// How language filtering was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    /// The filter was "all".
    Unfiltered,
    /// Streams were restricted to these tags.
    Filtered(Vec<String>),
    /// No stream carried an accepted tag, so every stream was kept.
    Fallback,
}

/// Streams left after language filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredStreams {
    /// Kept streams in discovery order, with their original indices.
    pub streams: Vec<StreamDescriptor>,
    /// What the filter did.
    pub decision: FilterDecision,
}

/// Build the probe command (`ffmpeg -hide_banner -i <input>`).
pub fn probe_command(ffmpeg: &str, input: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.arg("-hide_banner").arg("-i").arg(input);
    cmd
}

/// Run the probe and scan its diagnostic output.
///
/// ffmpeg exits non-zero when given no output file, so the exit status is
/// only logged; whatever stderr contains is scanned.
pub fn probe_streams(
    runner: &dyn ToolRunner,
    ffmpeg: &str,
    input: &Path,
    logger: &RunLogger,
) -> ProbeOutcome {
    let cmd = probe_command(ffmpeg, input);
    logger.command(&cmd.display());

    let output = match runner.capture(&cmd) {
        Ok(output) => output,
        Err(e) => {
            logger.warn(&format!("Probe failed, treating as no audio streams: {}", e));
            return ProbeOutcome::ToolError(e);
        }
    };

    tracing::debug!("Probe finished with {}", describe_status(output.status));

    let streams = scan_probe_output(&output.stderr);
    if streams.is_empty() {
        logger.output_text(&output.stderr, true);
        ProbeOutcome::NoStreams
    } else {
        ProbeOutcome::Streams(streams)
    }
}

/// Extract audio stream descriptors from probe output.
///
/// Every `Stream #..: Audio` line counts towards the audio index, parsed or
/// not, so a skipped line never shifts `0:a:N` onto another track.
pub fn scan_probe_output(text: &str) -> Vec<StreamDescriptor> {
    text.lines()
        .filter(|line| line.contains("Stream #") && line.contains("Audio"))
        .enumerate()
        .filter_map(|(index, line)| match parse_stream_line(line) {
            Some(parsed) => Some(parsed.into_descriptor(index)),
            None => {
                tracing::debug!("Skipping unparsable stream line: {}", line.trim());
                None
            }
        })
        .collect()
}

/// Restrict streams to the requested language.
///
/// The accepted tags are `{requested, undetermined}` intersected with the
/// tags actually present. When that intersection is empty every stream is
/// kept, so missing or mismatched tags never leave a file without audio.
pub fn filter_by_language(
    streams: Vec<StreamDescriptor>,
    filter: &LanguageFilter,
    undetermined: &str,
) -> FilteredStreams {
    let requested = match filter {
        LanguageFilter::All => {
            return FilteredStreams {
                streams,
                decision: FilterDecision::Unfiltered,
            }
        }
        LanguageFilter::Only(lang) => lang.as_str(),
    };

    let found: BTreeSet<&str> = streams.iter().filter_map(|s| s.language_tag()).collect();
    let accepted: Vec<String> = [requested, undetermined]
        .into_iter()
        .filter(|tag| found.contains(tag))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    if accepted.is_empty() {
        return FilteredStreams {
            streams,
            decision: FilterDecision::Fallback,
        };
    }

    let streams = streams
        .into_iter()
        .filter(|s| s.language_tag().is_some_and(|tag| accepted.iter().any(|a| a == tag)))
        .collect();

    FilteredStreams {
        streams,
        decision: FilterDecision::Filtered(accepted),
    }
}

/// Discover and filter the audio streams of one input file.
pub fn discover(
    runner: &dyn ToolRunner,
    ffmpeg: &str,
    input: &Path,
    filter: &LanguageFilter,
    undetermined: &str,
    logger: &RunLogger,
) -> Vec<StreamDescriptor> {
    let streams = probe_streams(runner, ffmpeg, input, logger).into_streams();
    let total = streams.len();

    for stream in &streams {
        logger.info(&format!("Found {}", stream.display_name()));
    }

    let filtered = filter_by_language(streams, filter, undetermined);
    match &filtered.decision {
        FilterDecision::Unfiltered => {
            logger.info(&format!("Keeping all {} audio stream(s)", total));
        }
        FilterDecision::Filtered(tags) => {
            logger.info(&format!(
                "Selected {} of {} audio stream(s) tagged {}",
                filtered.streams.len(),
                total,
                tags.join("/")
            ));
        }
        FilterDecision::Fallback => {
            if total > 0 {
                logger.info(&format!(
                    "No stream tagged '{}' or '{}', keeping all {} audio stream(s)",
                    filter, undetermined, total
                ));
            }
        }
    }

    filtered.streams
}
