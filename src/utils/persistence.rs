//! JSON file helpers for the ~/.twenty48/ directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.twenty48/ directory path, creating it if needed.
pub fn twenty48_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".twenty48");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.twenty48/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(twenty48_dir()?.join(filename))
}

/// Load JSON from `path`, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Write `data` to `path` as pretty-printed JSON.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}
