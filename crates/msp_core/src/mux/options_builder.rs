//! mkvmerge command options builder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Builder for mkvmerge command-line tokens.
///
/// The input contributes everything except its audio; every encoded file
/// becomes one audio track tagged with `language` and stripped of chapters.
/// Paths are passed through as `OsString`, untouched.
pub struct MkvmergeOptionsBuilder<'a> {
    input: &'a Path,
    output: &'a Path,
    audio_files: &'a [PathBuf],
    language: &'a str,
}

impl<'a> MkvmergeOptionsBuilder<'a> {
    pub fn new(input: &'a Path, output: &'a Path, audio_files: &'a [PathBuf]) -> Self {
        Self {
            input,
            output,
            audio_files,
            language: crate::models::DEFAULT_LANGUAGE,
        }
    }

    /// Language tag written on every new audio track.
    pub fn with_language(mut self, language: &'a str) -> Self {
        self.language = language;
        self
    }

    /// Build the complete token list (without the program name).
    pub fn build(&self) -> Vec<OsString> {
        let mut tokens: Vec<OsString> = vec![
            "-o".into(),
            self.output.into(),
            "--no-audio".into(),
            self.input.into(),
        ];

        for file in self.audio_files {
            tokens.push("--language".into());
            tokens.push(format!("0:{}", self.language).into());
            tokens.push("--no-chapters".into());
            tokens.push(file.into());
        }

        tokens
    }
}

/// One source file per line with its options, for debug output.
pub fn format_tokens_pretty(tokens: &[OsString]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for token in tokens {
        if (token == "--no-audio" || token == "--language") && !current.is_empty() {
            lines.push(current.join(" "));
            current.clear();
        }
        current.push(token.to_string_lossy().to_string());
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    format!("mkvmerge options:\n  {}", lines.join("\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_audio_input_then_tagged_tracks() {
        let files = vec![PathBuf::from("stream0_a.m4a"), PathBuf::from("stream2_b.m4a")];
        let tokens = MkvmergeOptionsBuilder::new(
            Path::new("movie.mp4"),
            Path::new("movie_aac.mkv"),
            &files,
        )
        .build();

        assert_eq!(
            tokens,
            vec![
                "-o", "movie_aac.mkv", "--no-audio", "movie.mp4",
                "--language", "0:eng", "--no-chapters", "stream0_a.m4a",
                "--language", "0:eng", "--no-chapters", "stream2_b.m4a",
            ]
        );
    }

    #[test]
    fn custom_language_tag() {
        let files = vec![PathBuf::from("stream0.m4a")];
        let tokens = MkvmergeOptionsBuilder::new(Path::new("in.mkv"), Path::new("out.mkv"), &files)
            .with_language("ger")
            .build();

        assert!(tokens.iter().any(|t| t == "0:ger"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_pass_through_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"film\xff.mp4"));
        let stream = PathBuf::from(OsStr::from_bytes(b"stream0_\xfe.m4a"));
        let files = vec![stream.clone()];
        let tokens = MkvmergeOptionsBuilder::new(input, Path::new("film_aac.mkv"), &files).build();

        assert_eq!(tokens[3].as_os_str(), input.as_os_str());
        assert_eq!(tokens[7].as_os_str(), stream.as_os_str());
    }

    #[test]
    fn pretty_format_groups_by_source() {
        let files = vec![PathBuf::from("stream0.m4a")];
        let tokens =
            MkvmergeOptionsBuilder::new(Path::new("in.mkv"), Path::new("out.mkv"), &files).build();

        assert_eq!(
            format_tokens_pretty(&tokens),
            "mkvmerge options:\n  -o out.mkv\n  --no-audio in.mkv\n  --language 0:eng --no-chapters stream0.m4a"
        );
    }

    #[test]
    fn paths_with_spaces_stay_single_tokens() {
        let files = vec![PathBuf::from("my temp/stream0.m4a")];
        let tokens = MkvmergeOptionsBuilder::new(
            Path::new("My Movie.mkv"),
            Path::new("My Movie_aac.mkv"),
            &files,
        )
        .build();

        assert_eq!(tokens[1], "My Movie_aac.mkv");
        assert_eq!(tokens[3], "My Movie.mkv");
        assert_eq!(tokens[7], "my temp/stream0.m4a");
    }
}
