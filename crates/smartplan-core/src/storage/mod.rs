mod config;
pub mod store;

pub use config::{Config, WorkConfig};
pub use store::TaskStore;

use std::path::PathBuf;

/// Returns `~/.config/smartplan[-dev]/` based on SMARTPLAN_ENV.
///
/// Set SMARTPLAN_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SMARTPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("smartplan-dev")
    } else {
        base_dir.join("smartplan")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
