//! Game configuration: ~/.twenty48/config.json plus command-line overrides.

use crate::core::constants::{
    DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, TICK_INTERVAL_MS,
};
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_FILENAME: &str = "twenty48.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size {0} must be between {min} and {max}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    InvalidBoardSize(usize),

    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,

    #[error("drag threshold must be at least 1 cell")]
    InvalidDragThreshold,

    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("{flag} expects a number, got '{value}'")]
    InvalidNumber { flag: String, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// What the command line asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliAction {
    Play,
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length in cells.
    pub board_size: usize,
    /// Milliseconds per simulation tick.
    pub tick_interval_ms: u64,
    /// RNG seed for reproducible games (None = random)
    pub seed: Option<u64>,
    /// Minimum mouse drag, in terminal cells, that counts as a swipe.
    pub drag_threshold: i32,
    /// `tracing` filter used when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            seed: None,
            drag_threshold: 2,
            log_filter: "twenty48=info".to_string(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value: value.clone(),
    })
}

impl GameConfig {
    /// Load ~/.twenty48/config.json, falling back to defaults if it is
    /// unreadable. A missing file is created from the defaults.
    pub fn load() -> Self {
        match data_path(CONFIG_FILENAME) {
            Ok(path) => Self::load_or_create(&path),
            Err(e) => {
                warn!(error = %e, "no config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Read `path`, writing the defaults there first if it does not exist.
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self::default();
        if let Err(e) = config.save_to(path) {
            warn!(path = %path.display(), error = %e, "could not write default config");
        }
        config
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json(path, self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::InvalidBoardSize(self.board_size));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.drag_threshold < 1 {
            return Err(ConfigError::InvalidDragThreshold);
        }
        Ok(())
    }

    /// Apply command-line flags (without the program name) on top of the file config.
    pub fn apply_args(&mut self, args: &[String]) -> Result<CliAction, ConfigError> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--size" => {
                    i += 1;
                    self.board_size = parse_number("--size", args.get(i))?;
                }
                "--seed" => {
                    i += 1;
                    self.seed = Some(parse_number("--seed", args.get(i))?);
                }
                "--tick-ms" => {
                    i += 1;
                    self.tick_interval_ms = parse_number("--tick-ms", args.get(i))?;
                }
                "--version" | "-v" => return Ok(CliAction::Version),
                "--help" | "-h" => return Ok(CliAction::Help),
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
            i += 1;
        }
        self.validate()?;
        Ok(CliAction::Play)
    }
}

pub fn usage() -> &'static str {
    "twenty48 - sliding tile puzzle\n\
     \n\
     Usage: twenty48 [OPTIONS]\n\
     \n\
     Options:\n\
     \x20 --size N       Board side length, 2-8 (default: 4)\n\
     \x20 --seed N       RNG seed for a reproducible game\n\
     \x20 --tick-ms N    Milliseconds per animation tick (default: 16)\n\
     \x20 --version, -v  Show version information\n\
     \x20 --help, -h     Show this help\n\
     \n\
     Settings are also read from ~/.twenty48/config.json."
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 4);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"board_size": 5}"#).unwrap();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.tick_interval_ms, TICK_INTERVAL_MS);
        assert_eq!(config.log_filter, "twenty48=info");
    }

    #[test]
    fn test_load_from_missing_file_defaults() {
        let path = std::env::temp_dir().join("twenty48_no_such_config.json");
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
    }

    #[test]
    fn test_save_then_load_keeps_fields() {
        let path = std::env::temp_dir()
            .join(format!("twenty48_config_{}.json", std::process::id()));
        let config = GameConfig {
            board_size: 6,
            seed: Some(7),
            drag_threshold: 3,
            ..GameConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(GameConfig::load_from(&path), config);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let path = std::env::temp_dir()
            .join(format!("twenty48_first_run_{}.json", std::process::id()));
        std::fs::remove_file(&path).ok();

        assert_eq!(GameConfig::load_or_create(&path), GameConfig::default());
        assert!(path.exists());
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_unwritable_config_path_falls_back_to_defaults() {
        let path = std::env::temp_dir()
            .join(format!("twenty48_missing_dir_{}", std::process::id()))
            .join("config.json");
        assert_eq!(GameConfig::load_or_create(&path), GameConfig::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config = GameConfig::default();
        let action = config
            .apply_args(&args(&["--size", "6", "--seed", "42", "--tick-ms", "30"]))
            .unwrap();
        assert_eq!(action, CliAction::Play);
        assert_eq!(config.board_size, 6);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_interval_ms, 30);
    }

    #[test]
    fn test_version_and_help_flags() {
        let mut config = GameConfig::default();
        assert_eq!(config.apply_args(&args(&["--version"])), Ok(CliAction::Version));
        assert_eq!(config.apply_args(&args(&["-h"])), Ok(CliAction::Help));
    }

    #[test]
    fn test_bad_args_are_reported() {
        let mut config = GameConfig::default();
        assert_eq!(
            config.apply_args(&args(&["--size"])),
            Err(ConfigError::MissingValue("--size".to_string()))
        );
        assert_eq!(
            config.apply_args(&args(&["--seed", "abc"])),
            Err(ConfigError::InvalidNumber {
                flag: "--seed".to_string(),
                value: "abc".to_string()
            })
        );
        assert_eq!(
            config.apply_args(&args(&["--bogus"])),
            Err(ConfigError::UnknownArgument("--bogus".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_size_rejected() {
        let mut config = GameConfig::default();
        assert_eq!(
            config.apply_args(&args(&["--size", "12"])),
            Err(ConfigError::InvalidBoardSize(12))
        );
        config.board_size = 4;
        config.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }
}
