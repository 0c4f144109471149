//! Encode step - measures loudness and transcodes every selected stream.

use crate::loudness::estimate_gain;
use crate::mux::podcast_output_path;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, FileState, StepOutcome};
use crate::transcode::{stream_temp_path, transcode_stream, TranscodeRequest};

/// Encode each selected stream to AAC.
///
/// Streams are handled one at a time: the measurement pass of a stream
/// finishes before its encode starts. In podcast mode every stream is
/// written to the same final file, so with several streams only the last
/// one survives.
#[derive(Debug, Default)]
pub struct EncodeStep;

impl EncodeStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for EncodeStep {
    fn name(&self) -> &str {
        "Encode"
    }

    fn validate_input(&self, ctx: &Context<'_>) -> StepResult<()> {
        // podcast output goes straight next to the input
        if ctx.run.podcast {
            return Ok(());
        }
        std::fs::create_dir_all(ctx.temp_dir())
            .map_err(|e| StepError::io_error("creating temp directory", e))
    }

    fn execute(&self, ctx: &Context<'_>, state: &mut FileState) -> StepResult<StepOutcome> {
        if !state.has_streams() {
            return Ok(StepOutcome::Skipped("no audio streams selected".to_string()));
        }

        let podcast_path = ctx
            .run
            .podcast
            .then(|| podcast_output_path(ctx.input(), &ctx.settings.output));
        if podcast_path.is_some() && state.streams.len() > 1 {
            ctx.logger.warn(&format!(
                "Podcast mode with {} selected streams: each one overwrites the same output, \
                 only the last stream is kept",
                state.streams.len()
            ));
        }

        let temp_dir = ctx.temp_dir();
        let apply_gain = ctx.apply_gain();
        let tools = &ctx.settings.tools;

        for stream in state.streams.iter_mut() {
            ctx.logger.info(&format!("Encoding {}", stream.display_name()));

            if apply_gain {
                let gain = estimate_gain(
                    ctx.runner,
                    &tools.ffmpeg,
                    ctx.input(),
                    stream,
                    ctx.run.channels,
                    ctx.logger,
                )?;
                stream.gain_db = Some(gain);
            }

            let output = match &podcast_path {
                Some(path) => path.clone(),
                None => {
                    let path = stream_temp_path(&temp_dir, stream.index);
                    // Recorded before encoding so a partial file is cleaned up.
                    state.temp_files.push(path.clone());
                    stream.temp_file = Some(path.clone());
                    path
                }
            };

            let request = TranscodeRequest {
                ffmpeg: &tools.ffmpeg,
                aac_encoder: &tools.aac_encoder,
                aac_quality: ctx.settings.encoding.aac_quality,
                input: ctx.input(),
                channel_override: ctx.run.channels,
                output: &output,
            };
            transcode_stream(ctx.runner, &request, stream, ctx.logger)?;
        }

        if let Some(path) = podcast_path {
            ctx.logger.success(&format!("Wrote {}", path.display()));
            state.output = Some(path);
        }
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context<'_>, state: &FileState) -> StepResult<()> {
        if let Some(missing) = state.temp_files.iter().find(|p| !p.exists()) {
            return Err(StepError::invalid_output(format!(
                "Encoded stream not created: {}",
                missing.display()
            )));
        }
        if let Some(output) = state.output.as_ref().filter(|p| !p.exists()) {
            return Err(StepError::invalid_output(format!(
                "Podcast file not created: {}",
                output.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::logging::{capturing_logger, LogConfig};
    use crate::models::{RunContext, StreamDescriptor};
    use crate::testing::ScriptedRunner;

    fn settings_in(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.encoding.temp_dir = dir.join("tmp").to_string_lossy().to_string();
        settings
    }

    fn surround(index: usize) -> StreamDescriptor {
        StreamDescriptor::new(index, "ac3", Some("eng".to_string()), "5.1(side)")
    }

    #[test]
    fn measures_then_encodes_each_stream() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let run = RunContext::new("movie.mkv");
        let (logger, _) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new()
            .with_measurement("[Parsed_volumedetect_1 @ 0x1] max_volume: -4.2 dB\n")
            .with_measurement("[Parsed_volumedetect_1 @ 0x1] max_volume: 0.0 dB\n");
        let ctx = Context::new(&run, &settings, "movie.mkv", &logger, &runner);
        let mut state = FileState {
            streams: vec![surround(0), surround(2)],
            ..FileState::default()
        };

        let step = EncodeStep::new();
        step.validate_input(&ctx).unwrap();
        step.execute(&ctx, &mut state).unwrap();
        step.validate_output(&ctx, &state).unwrap();

        assert_eq!(state.streams[0].gain_db, Some(4.2));
        assert_eq!(state.streams[1].gain_db, Some(0.0));
        assert_eq!(state.temp_files.len(), 2);
        assert_eq!(state.streams[1].temp_file.as_ref(), Some(&state.temp_files[1]));

        let pipes = runner.pipes();
        let decoder = pipes[0].0.display();
        assert!(decoder.contains("volume=+4.2dB"));
        assert!(decoder.contains("-ac 2"));
        assert!(pipes[1].0.display().contains("-map 0:a:2"));

        // measurement of a stream precedes its encode
        let measured = runner.commands();
        assert_eq!(measured.len(), 2);
        assert!(measured[1].display().contains("0:a:2"));
    }

    #[test]
    fn gain_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let run = RunContext::new("movie.mkv").with_gain(false);
        let (logger, _) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new();
        let ctx = Context::new(&run, &settings, "movie.mkv", &logger, &runner);
        let mut state = FileState {
            streams: vec![surround(0)],
            ..FileState::default()
        };

        let step = EncodeStep::new();
        step.validate_input(&ctx).unwrap();
        step.execute(&ctx, &mut state).unwrap();

        assert!(runner.commands().is_empty());
        assert_eq!(state.streams[0].gain_db, None);
        assert!(!runner.pipes()[0].0.display().contains("volume="));
    }

    #[test]
    fn failed_stream_aborts_and_keeps_artifact_list() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let run = RunContext::new("movie.mkv");
        let (logger, _) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new().with_failing_stream(1);
        let ctx = Context::new(&run, &settings, "movie.mkv", &logger, &runner);
        let mut state = FileState {
            streams: vec![surround(0), surround(1), surround(2)],
            ..FileState::default()
        };

        let step = EncodeStep::new();
        step.validate_input(&ctx).unwrap();
        let err = step.execute(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, StepError::Tool(_)));
        assert_eq!(state.temp_files.len(), 2);
        assert_eq!(runner.pipes().len(), 2);
    }

    #[test]
    fn nothing_selected_is_skipped() {
        let settings = Settings::default();
        let run = RunContext::new("movie.mkv");
        let (logger, _) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new();
        let ctx = Context::new(&run, &settings, "movie.mkv", &logger, &runner);
        let mut state = FileState::new();

        let outcome = EncodeStep::new().execute(&ctx, &mut state).unwrap();
        assert!(matches!(outcome, StepOutcome::Skipped(_)));
    }

    #[test]
    fn podcast_mode_leaves_temp_dir_alone() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let run = RunContext::new("movie.mkv").with_podcast(true);
        let (logger, _) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new();
        let ctx = Context::new(&run, &settings, "movie.mkv", &logger, &runner);

        EncodeStep::new().validate_input(&ctx).unwrap();

        assert!(!dir.path().join("tmp").exists());
    }
}
