//! volumedetect measurement pass.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::logging::RunLogger;
use crate::models::StreamDescriptor;
use crate::tools::{ToolCommand, ToolError, ToolRunner};
use crate::transcode::{audio_input_args, channel_args, channel_setting, filter_chain};

use super::error::{LoudnessError, LoudnessResult};

fn max_volume_regex() -> &'static Regex {
    static MAX_VOLUME: OnceLock<Regex> = OnceLock::new();
    MAX_VOLUME.get_or_init(|| {
        Regex::new(r"max_volume:\s*(?P<db>[-+]?[0-9.]+|-?inf)\s*dB")
            .expect("max_volume pattern is valid")
    })
}

/// Build the measurement command for one stream.
///
/// Uses the same channel setting as the encode so both passes see the
/// same layout.
pub fn measurement_command(
    ffmpeg: &str,
    input: &Path,
    stream: &StreamDescriptor,
    channel_override: u32,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg);
    audio_input_args(&mut cmd, input, stream.index);
    cmd.arg("-af").arg(filter_chain(Some("volumedetect")));
    channel_args(
        &mut cmd,
        channel_setting(channel_override, &stream.channel_layout),
    );
    cmd.args(["-f", "null", "-"]);
    cmd
}

/// Extract the single `max_volume` value (in dB) from measurement output.
pub fn parse_max_volume(text: &str) -> LoudnessResult<f64> {
    let values: Vec<&str> = max_volume_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.name("db").map(|m| m.as_str()))
        .collect();

    let [value] = values.as_slice() else {
        return Err(LoudnessError::AmbiguousMeasurement {
            found: values.len(),
        });
    };

    match value.parse::<f64>() {
        Ok(db) if db.is_finite() => Ok(db),
        _ => Err(LoudnessError::InvalidValue {
            value: value.to_string(),
        }),
    }
}

/// Gain that brings a measured peak to full scale.
///
/// A peak of -4.2 dB gives +4.2 dB.
pub fn gain_correction(max_volume_db: f64) -> f64 {
    let gain = -max_volume_db;
    // Avoid rendering "-0.0dB" for a peak already at full scale
    if gain == 0.0 {
        0.0
    } else {
        gain
    }
}

/// Measure one stream and return its gain correction.
pub fn estimate_gain(
    runner: &dyn ToolRunner,
    ffmpeg: &str,
    input: &Path,
    stream: &StreamDescriptor,
    channel_override: u32,
    logger: &RunLogger,
) -> LoudnessResult<f64> {
    let cmd = measurement_command(ffmpeg, input, stream, channel_override);
    logger.command(&cmd.display());

    let output = runner.capture(&cmd)?;
    if !output.success() {
        logger.output_text(&output.stderr, true);
        logger.show_tail("loudness measurement");
        return Err(ToolError::failed(
            cmd.tool_name(),
            output.exit_code(),
            "loudness measurement failed",
        )
        .into());
    }

    let max_volume = parse_max_volume(&output.stderr)?;
    let gain = gain_correction(max_volume);
    logger.info(&format!(
        "Stream {}: max_volume {:.1} dB, applying {:+.1} dB",
        stream.index, max_volume, gain
    ));
    Ok(gain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{capturing_logger, LogConfig};
    use crate::testing::ScriptedRunner;

    const VOLUMEDETECT: &str = "\
[Parsed_volumedetect_1 @ 0x55d0c8] n_samples: 290304000
[Parsed_volumedetect_1 @ 0x55d0c8] mean_volume: -27.3 dB
[Parsed_volumedetect_1 @ 0x55d0c8] max_volume: -4.2 dB
[Parsed_volumedetect_1 @ 0x55d0c8] histogram_4db: 12
";

    fn args(cmd: &ToolCommand) -> Vec<String> {
        cmd.get_args()
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn parses_single_max_volume() {
        assert_eq!(parse_max_volume(VOLUMEDETECT).unwrap(), -4.2);
        assert_eq!(parse_max_volume("max_volume: 0.0 dB").unwrap(), 0.0);
        assert_eq!(parse_max_volume("max_volume: 1.5 dB").unwrap(), 1.5);
    }

    #[test]
    fn missing_value_is_ambiguous() {
        let err = parse_max_volume("mean_volume: -27.3 dB").unwrap_err();
        assert!(matches!(err, LoudnessError::AmbiguousMeasurement { found: 0 }));
    }

    #[test]
    fn repeated_value_is_ambiguous() {
        let text = format!("{}{}", VOLUMEDETECT, VOLUMEDETECT);
        let err = parse_max_volume(&text).unwrap_err();
        assert!(matches!(err, LoudnessError::AmbiguousMeasurement { found: 2 }));
    }

    #[test]
    fn silent_stream_is_invalid() {
        let err = parse_max_volume("max_volume: -inf dB").unwrap_err();
        assert!(matches!(err, LoudnessError::InvalidValue { .. }));
    }

    #[test]
    fn gain_inverts_sign_and_keeps_magnitude() {
        assert_eq!(gain_correction(-4.2), 4.2);
        assert_eq!(format!("{:+.1}", gain_correction(-4.2)), "+4.2");
        assert_eq!(gain_correction(0.5), -0.5);
        assert_eq!(format!("{:+.1}", gain_correction(0.0)), "+0.0");
        assert_eq!(format!("{:+.1}", gain_correction(-0.0)), "+0.0");
    }

    #[test]
    fn measurement_downmixes_surround() {
        let stream = StreamDescriptor::new(2, "ac3", Some("eng".to_string()), "5.1(side)");
        let cmd = measurement_command("ffmpeg", Path::new("movie.mkv"), &stream, 0);

        assert_eq!(
            args(&cmd),
            vec![
                "-hide_banner", "-i", "movie.mkv", "-vn", "-sn", "-map", "0:a:2", "-af",
                "aresample=async=1,volumedetect", "-ac", "2", "-f", "null", "-",
            ]
        );
    }

    #[test]
    fn measurement_keeps_stereo_layout() {
        let stream = StreamDescriptor::new(0, "aac", None, "stereo");
        let cmd = measurement_command("ffmpeg", Path::new("movie.mkv"), &stream, 0);
        assert!(!args(&cmd).contains(&"-ac".to_string()));
    }

    #[test]
    fn estimate_returns_inverted_peak() {
        let (logger, lines) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new().with_measurement(VOLUMEDETECT);
        let stream = StreamDescriptor::new(1, "ac3", Some("eng".to_string()), "5.1(side)");

        let gain =
            estimate_gain(&runner, "ffmpeg", Path::new("movie.mkv"), &stream, 0, &logger).unwrap();

        assert_eq!(gain, 4.2);
        let lines = lines.lock();
        assert!(lines.iter().any(|l| l.starts_with("$ ffmpeg") && l.contains("volumedetect")));
        assert!(lines.iter().any(|l| l.contains("applying +4.2 dB")));
    }

    #[test]
    fn estimate_propagates_tool_failure() {
        let (logger, _) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new().with_failing_measurement();
        let stream = StreamDescriptor::new(0, "aac", None, "stereo");

        let err = estimate_gain(&runner, "ffmpeg", Path::new("movie.mkv"), &stream, 0, &logger)
            .unwrap_err();

        assert!(matches!(err, LoudnessError::Tool(_)));
        assert!(!err.is_untrusted_measurement());
    }
}
