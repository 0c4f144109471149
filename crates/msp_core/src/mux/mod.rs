//! Remux of encoded audio into the output container, and cleanup.
//!
//! The muxer keeps every non-audio track of the input and appends one
//! audio track per encoded artifact:
//!
//! ```text
//! mkvmerge -o movie_aac.mkv --no-audio movie.mkv \
//!     --language 0:eng --no-chapters stream0_<hash>.m4a ...
//! ```

mod cleanup;
mod naming;
mod options_builder;

pub use cleanup::{delete_temp_files, CleanupReport};
pub use naming::{mux_output_path, output_path_with_suffix, podcast_output_path};
pub use options_builder::{format_tokens_pretty, MkvmergeOptionsBuilder};

use std::ffi::OsString;

use crate::logging::RunLogger;
use crate::tools::{ToolCommand, ToolError, ToolResult, ToolRunner};

/// mkvmerge exit code meaning "finished with warnings".
pub const MKVMERGE_WARNING_EXIT: i32 = 1;

/// Run mkvmerge with prepared tokens.
///
/// Exit code 0 is success, 1 is success with warnings, anything else
/// (or no exit code at all) is a failure. Returns the exit code.
pub fn run_mkvmerge(
    runner: &dyn ToolRunner,
    mkvmerge: &str,
    tokens: &[OsString],
    logger: &RunLogger,
) -> ToolResult<i32> {
    let mut cmd = ToolCommand::new(mkvmerge);
    cmd.args(tokens);
    logger.command(&cmd.display());
    logger.debug(&format_tokens_pretty(tokens));

    let output = runner.capture(&cmd)?;
    logger.output_text(&output.stdout, false);
    logger.output_text(&output.stderr, true);

    match output.status {
        Some(0) => Ok(0),
        Some(MKVMERGE_WARNING_EXIT) => {
            logger.warn("mkvmerge completed with warnings");
            Ok(MKVMERGE_WARNING_EXIT)
        }
        status => {
            logger.show_tail("mkvmerge output");
            let message = if output.stderr.trim().is_empty() {
                output.stdout.trim().to_string()
            } else {
                output.stderr.trim().to_string()
            };
            Err(ToolError::failed(
                cmd.tool_name(),
                status.unwrap_or(-1),
                message,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{capturing_logger, LogConfig};
    use crate::testing::ScriptedRunner;

    fn tokens(dir: &std::path::Path) -> Vec<OsString> {
        vec![
            "-o".into(),
            dir.join("movie_aac.mkv").into(),
            "--no-audio".into(),
            "movie.mkv".into(),
        ]
    }

    #[test]
    fn warnings_are_not_failures() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, lines) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new().with_mux_status(1);

        let code = run_mkvmerge(&runner, "mkvmerge", &tokens(dir.path()), &logger).unwrap();

        assert_eq!(code, 1);
        assert!(lines
            .lock()
            .iter()
            .any(|l| l.contains("mkvmerge completed with warnings")));
    }

    #[test]
    fn exit_code_two_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, _) = capturing_logger(LogConfig::default());
        let runner = ScriptedRunner::new().with_mux_status(2);

        let err = run_mkvmerge(&runner, "mkvmerge", &tokens(dir.path()), &logger).unwrap_err();

        assert!(matches!(err, ToolError::Failed { exit_code: 2, .. }));
    }
}
