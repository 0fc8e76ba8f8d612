//! Path utilities for hedgebook.
//!
//! User-level files live under `~/.hedgebook/`:
//! - `~/.hedgebook/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the hedgebook home directory (`~/.hedgebook/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hedgebook")
}

/// Returns the default config file path (`~/.hedgebook/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
