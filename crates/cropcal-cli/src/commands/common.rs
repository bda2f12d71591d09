//! Shared helpers for CLI commands.

use cropcal_core::storage::{Config, FarmDb};

/// Open the farm database at the configured location.
pub fn open_db() -> Result<FarmDb, Box<dyn std::error::Error>> {
    Ok(FarmDb::open_default()?)
}

/// The acting user: an explicit `--user` value, or the configured default.
pub fn resolve_user(user: Option<i64>) -> Result<i64, Box<dyn std::error::Error>> {
    match user {
        Some(id) => Ok(id),
        None => Ok(Config::load()?.calendar.default_user),
    }
}
