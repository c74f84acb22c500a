mod config;
pub mod database;

pub use config::{Config, DashboardConfig, LoggingConfig, TasksConfig, MAX_WINDOW_DAYS};
pub use database::{Database, LOGS_SLOT, TASKS_SLOT};

use std::path::PathBuf;

/// Returns the StreakFlow data directory, creating it if needed.
///
/// `STREAKFLOW_DATA_DIR` overrides the location outright. Otherwise the
/// directory is `~/.config/streakflow[-dev]/`, with `STREAKFLOW_ENV=dev`
/// selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("STREAKFLOW_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STREAKFLOW_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("streakflow-dev")
            } else {
                base_dir.join("streakflow")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
