mod config;
pub mod farm_db;

pub use config::{CalendarConfig, Config, DatabaseConfig};
pub use farm_db::FarmDb;

use std::path::PathBuf;

/// Returns `~/.config/cropcal[-dev]/` based on CROPCAL_ENV.
///
/// Set CROPCAL_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CROPCAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("cropcal-dev")
    } else {
        base_dir.join("cropcal")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
