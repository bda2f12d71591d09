//! Data model for crops, task templates, and calendar events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::season::{MonthDay, SeasonWindow};

/// A crop's sowing rule.
///
/// `sowing_start`/`sowing_end` bound the recurring annual window during which
/// the crop may be sown; a crop missing either bound is unrestricted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub id: i64,
    pub name: String,
    pub sowing_start: Option<MonthDay>,
    pub sowing_end: Option<MonthDay>,
}

impl Crop {
    /// The sowing window, when both bounds are present.
    pub fn season_window(&self) -> Option<SeasonWindow> {
        match (self.sowing_start, self.sowing_end) {
            (Some(start), Some(end)) => Some(SeasonWindow::new(start, end)),
            _ => None,
        }
    }

    /// Whether `date` falls inside the crop's sowing window.
    ///
    /// Crops without a window accept every date.
    pub fn is_in_season(&self, date: NaiveDate) -> bool {
        match self.season_window() {
            Some(window) => window.contains_date(date),
            None => true,
        }
    }
}

/// A per-crop task blueprint: what to do, and how many days from sowing.
///
/// Offsets are signed; the stock rules only use zero or positive offsets, but
/// nothing forbids a task before the sowing date (seed-bed preparation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub id: i64,
    pub crop_id: i64,
    pub task_type: String,
    pub day_offset: i64,
    pub notes: Option<String>,
}

/// An event expanded from a task template, before the store assigns an id
/// and an owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGeneratedEvent {
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
    pub crop_name: String,
}

/// A persisted generated event. Never mutated after the batch insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEvent {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
    pub crop_name: String,
}

/// A user-authored calendar event, independent of any crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
}

/// Outcome of a sowing-date check.
///
/// `window` is `None` for unrestricted crops, which are always in season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonVerdict {
    pub in_season: bool,
    pub window: Option<SeasonWindow>,
}
