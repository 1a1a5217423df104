//! `tracing` subscriber setup.
//!
//! The terminal UI owns stdout, so the game logs to ~/.twenty48/twenty48.log.
//! Headless tools log to stderr.

use crate::config::{GameConfig, LOG_FILENAME};
use crate::utils::persistence::data_path;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// RUST_LOG wins over the configured filter.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install a subscriber appending to the log file. Returns the file path.
pub fn init_file_logging(config: &GameConfig) -> io::Result<PathBuf> {
    let path = data_path(LOG_FILENAME)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)?;
    Ok(path)
}

pub fn init_stderr_logging(default_filter: &str) -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(io::stderr)
        .try_init()
        .map_err(io::Error::other)
}
