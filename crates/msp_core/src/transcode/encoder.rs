//! Command construction and the decode | encode pipe.

use std::path::Path;

use crate::logging::RunLogger;
use crate::models::StreamDescriptor;
use crate::tools::{ToolCommand, ToolResult, ToolRunner};

use super::channels::{channel_args, channel_setting};

/// Resampler filter that corrects timestamp drift.
const RESAMPLE_FILTER: &str = "aresample=async=1";

/// Everything needed to transcode one stream.
#[derive(Debug, Clone)]
pub struct TranscodeRequest<'a> {
    /// Decoder program (ffmpeg).
    pub ffmpeg: &'a str,
    /// AAC encoder program.
    pub aac_encoder: &'a str,
    /// Encoder quality (`-q`).
    pub aac_quality: f64,
    /// Input container.
    pub input: &'a Path,
    /// Channel override, 0 = automatic.
    pub channel_override: u32,
    /// Destination file.
    pub output: &'a Path,
}

/// Append the input and stream-selection arguments shared by every pass.
pub fn audio_input_args(cmd: &mut ToolCommand, input: &Path, index: usize) {
    cmd.arg("-hide_banner")
        .arg("-i")
        .arg(input)
        .args(["-vn", "-sn", "-map"])
        .arg(format!("0:a:{}", index));
}

/// Audio filter chain: drift correction, then an optional extra filter.
///
/// ffmpeg honours only the last `-af`, so filters are chained in one.
pub fn filter_chain(extra: Option<&str>) -> String {
    match extra {
        Some(filter) => format!("{},{}", RESAMPLE_FILTER, filter),
        None => RESAMPLE_FILTER.to_string(),
    }
}

/// Gain filter with one-decimal precision (`volume=+4.2dB`).
pub fn volume_filter(gain_db: f64) -> String {
    format!("volume={:+.1}dB", gain_db)
}

/// Decoder: selected stream as WAV on stdout.
pub fn decode_command(
    ffmpeg: &str,
    input: &Path,
    stream: &StreamDescriptor,
    channel_override: u32,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg);
    audio_input_args(&mut cmd, input, stream.index);

    let gain = stream.gain_db.map(volume_filter);
    cmd.arg("-af").arg(filter_chain(gain.as_deref()));
    channel_args(
        &mut cmd,
        channel_setting(channel_override, &stream.channel_layout),
    );
    cmd.args(["-f", "wav", "-"]);
    cmd
}

/// Encoder: WAV from stdin to an AAC file.
pub fn encode_command(aac_encoder: &str, quality: f64, output: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(aac_encoder);
    cmd.arg("-q")
        .arg(quality.to_string())
        .args(["-ignorelength", "-if", "-", "-of"])
        .arg(output);
    cmd
}

/// Transcode one stream into `request.output`.
///
/// Either side failing fails the whole transcode.
pub fn transcode_stream(
    runner: &dyn ToolRunner,
    request: &TranscodeRequest<'_>,
    stream: &StreamDescriptor,
    logger: &RunLogger,
) -> ToolResult<()> {
    let decoder = decode_command(
        request.ffmpeg,
        request.input,
        stream,
        request.channel_override,
    );
    let encoder = encode_command(request.aac_encoder, request.aac_quality, request.output);

    logger.command(&decoder.display());
    logger.command(&encoder.display());

    runner.pipe(&decoder, &encoder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{capturing_logger, LogConfig};
    use crate::loudness::measurement_command;
    use crate::testing::ScriptedRunner;

    fn args(cmd: &ToolCommand) -> Vec<String> {
        cmd.get_args()
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn volume_filter_has_one_decimal_and_sign() {
        assert_eq!(volume_filter(4.2), "volume=+4.2dB");
        assert_eq!(volume_filter(4.25001), "volume=+4.3dB");
        assert_eq!(volume_filter(-1.0), "volume=-1.0dB");
    }

    #[test]
    fn decode_applies_gain_and_downmix() {
        let mut stream = StreamDescriptor::new(1, "ac3", Some("eng".to_string()), "5.1(side)");
        stream.gain_db = Some(4.2);

        let cmd = decode_command("ffmpeg", Path::new("movie.mkv"), &stream, 0);

        assert_eq!(
            args(&cmd),
            vec![
                "-hide_banner", "-i", "movie.mkv", "-vn", "-sn", "-map", "0:a:1", "-af",
                "aresample=async=1,volume=+4.2dB", "-ac", "2", "-f", "wav", "-",
            ]
        );
    }

    #[test]
    fn decode_without_gain_only_resamples() {
        let stream = StreamDescriptor::new(0, "aac", None, "stereo");
        let cmd = decode_command("ffmpeg", Path::new("movie.mkv"), &stream, 1);

        let args = args(&cmd);
        assert!(args.contains(&"aresample=async=1".to_string()));
        assert!(args.windows(2).any(|w| w == ["-ac", "1"]));
    }

    #[test]
    fn measurement_and_decode_force_the_same_channels() {
        let input = Path::new("movie.mkv");
        for layout in ["5.1(side)", "stereo"] {
            let stream = StreamDescriptor::new(0, "ac3", None, layout);
            for channel_override in [0, 1, 2, 6] {
                let measured = measurement_command("ffmpeg", input, &stream, channel_override);
                let decoded = decode_command("ffmpeg", input, &stream, channel_override);
                assert_eq!(
                    measured.value_after("-ac"),
                    decoded.value_after("-ac"),
                    "{} with -c {}",
                    layout,
                    channel_override
                );
            }
        }

        let surround = StreamDescriptor::new(0, "ac3", None, "5.1(side)");
        let stereo = StreamDescriptor::new(0, "aac", None, "stereo");
        let forced = |s: &StreamDescriptor| {
            decode_command("ffmpeg", input, s, 0)
                .value_after("-ac")
                .map(|v| v.to_string_lossy().to_string())
        };
        assert_eq!(forced(&surround).as_deref(), Some("2"));
        assert_eq!(forced(&stereo), None);
    }

    #[test]
    fn encoder_reads_stdin_and_writes_output() {
        let cmd = encode_command("neroAacEnc", 0.42, Path::new("stream0_abc.m4a"));
        assert_eq!(
            cmd.display(),
            "neroAacEnc -q 0.42 -ignorelength -if - -of stream0_abc.m4a"
        );
    }

    #[test]
    fn transcode_pipes_decoder_into_encoder() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("stream1.m4a");
        let (logger, lines) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new();
        let stream = StreamDescriptor::new(1, "ac3", None, "5.1");

        let request = TranscodeRequest {
            ffmpeg: "ffmpeg",
            aac_encoder: "neroAacEnc",
            aac_quality: 0.42,
            input: Path::new("movie.mkv"),
            channel_override: 0,
            output: &output,
        };
        transcode_stream(&runner, &request, &stream, &logger).unwrap();

        assert!(output.exists());
        let pipes = runner.pipes();
        assert_eq!(pipes.len(), 1);
        assert_eq!(pipes[0].0.tool_name(), "ffmpeg");
        assert_eq!(pipes[0].1.tool_name(), "neroAacEnc");
        assert_eq!(lines.lock().iter().filter(|l| l.starts_with("$ ")).count(), 2);
    }

    #[test]
    fn transcode_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("stream0.m4a");
        let (logger, _) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new().with_failing_stream(0);
        let stream = StreamDescriptor::new(0, "aac", None, "stereo");

        let request = TranscodeRequest {
            ffmpeg: "ffmpeg",
            aac_encoder: "neroAacEnc",
            aac_quality: 0.42,
            input: Path::new("movie.mkv"),
            channel_override: 0,
            output: &output,
        };

        assert!(transcode_stream(&runner, &request, &stream, &logger).is_err());
        assert!(!output.exists());
    }
}
