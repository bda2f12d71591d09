//! Store interfaces the planner depends on.
//!
//! Crop lookup and event persistence sit behind these traits so the season
//! validator and the event generator stay free of database concerns.
//! [`FarmDb`](crate::storage::FarmDb) is the SQLite implementation.

use crate::error::Result;
use crate::model::{Crop, GeneratedEvent, NewGeneratedEvent, TaskTemplate};

/// Keyed lookup of crop rules and their task templates.
pub trait CropStore {
    /// Look up a crop rule by its unique name.
    fn find_crop_by_name(&self, name: &str) -> Result<Option<Crop>>;

    /// Task templates for a crop, in definition order.
    fn list_tasks_for_crop(&self, crop_id: i64) -> Result<Vec<TaskTemplate>>;
}

/// Persistence sink for generated event batches.
pub trait EventStore {
    /// Persist a batch for `user_id` atomically, returning the stored rows
    /// with their assigned ids.
    ///
    /// Either the whole batch is written or none of it; a failure must leave
    /// the store unchanged.
    fn insert_generated_batch(
        &mut self,
        user_id: i64,
        events: &[NewGeneratedEvent],
    ) -> Result<Vec<GeneratedEvent>>;
}
