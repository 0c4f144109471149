//! Configuration management for movie-sound-prepare.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Defaults for every missing key, cleanup of unknown sections on load
//!
//! # Example
//!
//! ```no_run
//! use msp_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new("movie-sound-prepare.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Encoder: {}", config.settings().tools.aac_encoder);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    EncodingSettings, LoggingSettings, OutputSettings, SelectionSettings, Settings, ToolSettings,
};
