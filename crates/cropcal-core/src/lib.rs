//! # Cropcal Core Library
//!
//! This library provides the core business logic for the Cropcal farm
//! calendar. All operations are available via a standalone CLI binary; any
//! richer frontend is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Season windows**: recurring annual month-day ranges, including ranges
//!   that wrap the year boundary (October through February)
//! - **Event generation**: pure expansion of a crop's task templates into
//!   dated calendar events from a chosen sowing date
//! - **Planner**: orchestrates crop lookup, season validation, generation,
//!   and atomic batch persistence
//! - **Storage**: SQLite-based event and crop-rule storage, TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`SeasonWindow`]: membership test for possibly year-wrapping windows
//! - [`SowingPlanner`]: resolve -> validate -> generate -> persist sequence
//! - [`FarmDb`]: crop rules, task templates, and event persistence
//! - [`Config`]: application configuration management

pub mod agenda;
pub mod error;
pub mod generator;
pub mod model;
pub mod planner;
pub mod season;
pub mod storage;
pub mod store;

pub use agenda::{assemble, AgendaEntry, EventSource};
pub use error::{CalendarError, ConfigError, CoreError, DatabaseError, Result};
pub use model::{Crop, CustomEvent, GeneratedEvent, NewGeneratedEvent, SeasonVerdict, TaskTemplate};
pub use planner::SowingPlanner;
pub use season::{MonthDay, SeasonWindow};
pub use storage::{Config, FarmDb};
pub use store::{CropStore, EventStore};
