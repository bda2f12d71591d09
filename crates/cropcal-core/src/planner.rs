//! Sowing orchestration: resolve the crop, validate the date, expand the
//! task templates, persist the batch.

use chrono::NaiveDate;

use crate::error::{CalendarError, Result};
use crate::generator;
use crate::model::{Crop, GeneratedEvent, SeasonVerdict};
use crate::store::{CropStore, EventStore};

/// Drives the resolve -> validate -> generate -> persist sequence against a
/// backing store.
pub struct SowingPlanner<S> {
    store: S,
}

impl<S> SowingPlanner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: CropStore> SowingPlanner<S> {
    /// Check a candidate sowing date against the crop's annual window.
    ///
    /// The verdict carries the window bounds for restricted crops so callers
    /// can build a user-facing message.
    ///
    /// # Errors
    /// `CalendarError::CropNotFound` when no crop has that name.
    pub fn validate_sowing_date(&self, crop_name: &str, date: NaiveDate) -> Result<SeasonVerdict> {
        let crop = self.resolve(crop_name)?;
        Ok(SeasonVerdict {
            in_season: crop.is_in_season(date),
            window: crop.season_window(),
        })
    }

    fn resolve(&self, crop_name: &str) -> Result<Crop> {
        self.store.find_crop_by_name(crop_name)?.ok_or_else(|| {
            CalendarError::CropNotFound {
                name: crop_name.to_string(),
            }
            .into()
        })
    }
}

impl<S: CropStore + EventStore> SowingPlanner<S> {
    /// Generate and persist the full event batch for one sowing submission.
    ///
    /// The crop lookup and season check run before anything is written, so a
    /// failure leaves the event store untouched. Repeated submissions are not
    /// deduplicated; each call appends its own batch.
    ///
    /// # Errors
    /// `CalendarError::CropNotFound` for unknown crops;
    /// `CalendarError::OutOfSeason`, carrying the violated window, when the
    /// date falls outside the crop's sowing window.
    pub fn generate_events_for_sowing(
        &mut self,
        user_id: i64,
        crop_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<GeneratedEvent>> {
        let crop = self.resolve(crop_name)?;
        if let Some(window) = crop.season_window() {
            if !window.contains_date(date) {
                return Err(CalendarError::OutOfSeason {
                    crop: crop.name,
                    window,
                }
                .into());
            }
        }

        let templates = self.store.list_tasks_for_crop(crop.id)?;
        let batch = generator::expand_templates(&crop.name, date, &templates)?;
        let stored = self.store.insert_generated_batch(user_id, &batch)?;
        tracing::info!(
            crop = %crop.name,
            sowing_date = %date,
            events = stored.len(),
            "generated sowing batch"
        );
        Ok(stored)
    }
}
