//! Config manager for loading and atomically saving settings.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Validation on load (unknown sections and missing keys trigger a rewrite)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::DocumentMut;

use super::settings::Settings;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages the configuration file.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_create()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Changes are only in memory until `save()` is called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Consume the manager and return the loaded settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Load config from file, creating it with defaults if it doesn't exist.
    ///
    /// An existing file with unknown sections or missing keys is rewritten
    /// in canonical form.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, was_modified) = parse_validate_and_clean(&content)?;
            self.settings = settings;

            if was_modified {
                tracing::info!("Normalizing config file {}", self.config_path.display());
                self.save()?;
            }
        } else {
            tracing::info!("Creating default config at {}", self.config_path.display());
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Generate config content with a comment above each section.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let sections = [
            (
                "External programs (names on PATH or absolute paths)",
                "tools",
                toml::to_string_pretty(&self.settings.tools)?,
            ),
            (
                "Audio stream selection",
                "selection",
                toml::to_string_pretty(&self.settings.selection)?,
            ),
            (
                "Loudness correction and AAC encoding",
                "encoding",
                toml::to_string_pretty(&self.settings.encoding)?,
            ),
            (
                "Output naming and tagging",
                "output",
                toml::to_string_pretty(&self.settings.output)?,
            ),
            (
                "Logging",
                "logging",
                toml::to_string_pretty(&self.settings.logging)?,
            ),
        ];

        let mut output = String::from("# movie-sound-prepare configuration\n\n");
        for (comment, table, body) in sections {
            output.push_str(&format!("# {}\n[{}]\n", comment, table));
            for line in body.lines() {
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }

        Ok(output)
    }

    /// Write content to config file atomically.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Same directory, so the rename stays on one filesystem
        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

/// Parse and check content for unknown sections or missing keys.
///
/// Returns the settings and whether the file should be rewritten.
fn parse_validate_and_clean(content: &str) -> ConfigResult<(Settings, bool)> {
    let doc: DocumentMut = content.parse()?;
    let settings: Settings = toml::from_str(content)?;

    let has_unknown = doc
        .iter()
        .any(|(key, _)| !Settings::SECTIONS.contains(&key));

    let has_missing = Settings::SECTIONS.iter().any(|section| {
        let Some(table) = doc.get(section).and_then(|item| item.as_table()) else {
            return true;
        };
        let defaults = match *section {
            "tools" => toml::to_string(&settings.tools),
            "selection" => toml::to_string(&settings.selection),
            "encoding" => toml::to_string(&settings.encoding),
            "output" => toml::to_string(&settings.output),
            _ => toml::to_string(&settings.logging),
        };
        match defaults.ok().and_then(|s| s.parse::<DocumentMut>().ok()) {
            Some(expected) => expected.iter().any(|(key, _)| !table.contains_key(key)),
            None => false,
        }
    });

    Ok((settings, has_unknown || has_missing))
}
