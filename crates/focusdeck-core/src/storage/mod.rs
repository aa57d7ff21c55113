mod config;
pub mod database;
mod kv;

pub use config::{Config, ConfettiConfig, DisplayConfig, TimerConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryKv};

use std::path::PathBuf;

/// Resolves the data directory and creates it if needed.
///
/// `FOCUSDECK_DATA_DIR` wins when set. Otherwise `~/.config/focusdeck[-dev]/`
/// based on `FOCUSDECK_ENV` (set `FOCUSDECK_ENV=dev` for the development
/// directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("FOCUSDECK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSDECK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusdeck-dev")
            } else {
                base_dir.join("focusdeck")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
