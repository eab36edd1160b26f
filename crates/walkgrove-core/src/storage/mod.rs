mod config;
pub mod database;

pub use config::{
    Config, GoalConfig, Theme, UiConfig, GOAL_STEP_INCREMENT, MAX_DAILY_STEPS, MIN_DAILY_STEPS,
};
pub use database::{Database, GardenRecord, PlantedTreeRecord, Stats};

use std::path::PathBuf;

/// Returns `~/.config/walkgrove[-dev]/` based on WALKGROVE_ENV.
///
/// Set WALKGROVE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WALKGROVE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("walkgrove-dev")
    } else {
        base_dir.join("walkgrove")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
