pub mod settings;
pub mod tasks;

pub use settings::{Settings, SettingsStore};
pub use tasks::{Task, TaskSeed, TaskStore};

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Returns the Pomcraft data directory, `~/.pomcraft` by default.
///
/// Set POMCRAFT_DATA_DIR to override the location (used by tests and
/// development builds).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMCRAFT_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pomcraft"),
    };

    std::fs::create_dir_all(&dir).map_err(|e| CoreError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
