//! SQLite-based storage for crop rules, task templates, and calendar events.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{DatabaseError, Result};
use crate::model::{Crop, CustomEvent, GeneratedEvent, NewGeneratedEvent, TaskTemplate};
use crate::season::MonthDay;
use crate::storage::Config;
use crate::store::{CropStore, EventStore};

// === Helper Functions ===

/// Format a date for database storage
fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a date column stored as `YYYY-MM-DD`
fn parse_date_col(idx: usize, value: String) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse an optional month-day column stored as `MM-DD`
fn parse_month_day_col(
    idx: usize,
    value: Option<String>,
) -> Result<Option<MonthDay>, rusqlite::Error> {
    value
        .map(|s| {
            s.parse::<MonthDay>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Build a Crop from a database row
fn row_to_crop(row: &rusqlite::Row) -> Result<Crop, rusqlite::Error> {
    Ok(Crop {
        id: row.get(0)?,
        name: row.get(1)?,
        sowing_start: parse_month_day_col(2, row.get(2)?)?,
        sowing_end: parse_month_day_col(3, row.get(3)?)?,
    })
}

/// Build a TaskTemplate from a database row
fn row_to_task(row: &rusqlite::Row) -> Result<TaskTemplate, rusqlite::Error> {
    Ok(TaskTemplate {
        id: row.get(0)?,
        crop_id: row.get(1)?,
        task_type: row.get(2)?,
        day_offset: row.get(3)?,
        notes: row.get(4)?,
    })
}

/// Build a CustomEvent from a database row
fn row_to_custom_event(row: &rusqlite::Row) -> Result<CustomEvent, rusqlite::Error> {
    Ok(CustomEvent {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        date: parse_date_col(3, row.get(3)?)?,
        notes: row.get(4)?,
    })
}

/// Build a GeneratedEvent from a database row
fn row_to_generated_event(row: &rusqlite::Row) -> Result<GeneratedEvent, rusqlite::Error> {
    Ok(GeneratedEvent {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        date: parse_date_col(3, row.get(3)?)?,
        notes: row.get(4)?,
        crop_name: row.get(5)?,
    })
}

/// SQLite database for the farm calendar.
///
/// Stores crop sowing rules, their task templates, and per-user custom and
/// generated events. One connection per value; open a fresh one per request
/// scope instead of sharing globally.
pub struct FarmDb {
    conn: Connection,
}

impl FarmDb {
    /// Open the database at `path`, creating tables on first use.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(&path).map_err(|e| DatabaseError::OpenFailed {
            path: PathBuf::from(path.as_ref()),
            source: e,
        })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open the database at the location named by the loaded [`Config`].
    pub fn open_default() -> Result<Self> {
        let config = Config::load()?;
        Self::open(config.database_path()?)
    }

    /// Open an in-memory database (for tests and ephemeral use).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS crops (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                name         TEXT NOT NULL UNIQUE,
                sowing_start TEXT,
                sowing_end   TEXT
            );

            CREATE TABLE IF NOT EXISTS crop_tasks (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                crop_id    INTEGER NOT NULL REFERENCES crops(id),
                task_type  TEXT NOT NULL,
                day_offset INTEGER NOT NULL,
                notes      TEXT
            );

            CREATE TABLE IF NOT EXISTS custom_events (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title   TEXT NOT NULL,
                date    TEXT NOT NULL,
                notes   TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS auto_events (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id   INTEGER NOT NULL,
                title     TEXT NOT NULL,
                date      TEXT NOT NULL,
                notes     TEXT NOT NULL DEFAULT '',
                crop_name TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_crop_tasks_crop ON crop_tasks(crop_id);
            CREATE INDEX IF NOT EXISTS idx_custom_events_user ON custom_events(user_id);
            CREATE INDEX IF NOT EXISTS idx_auto_events_user ON auto_events(user_id);",
        )?;
        Ok(())
    }

    // === Crop CRUD ===

    /// Register a crop rule. `name` must be unique.
    pub fn create_crop(
        &self,
        name: &str,
        sowing_start: Option<MonthDay>,
        sowing_end: Option<MonthDay>,
    ) -> Result<Crop> {
        self.conn.execute(
            "INSERT INTO crops (name, sowing_start, sowing_end) VALUES (?1, ?2, ?3)",
            params![
                name,
                sowing_start.map(|md| md.to_string()),
                sowing_end.map(|md| md.to_string()),
            ],
        )?;
        Ok(Crop {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            sowing_start,
            sowing_end,
        })
    }

    /// Get a crop rule by id.
    pub fn get_crop(&self, id: i64) -> Result<Option<Crop>> {
        let crop = self
            .conn
            .query_row(
                "SELECT id, name, sowing_start, sowing_end FROM crops WHERE id = ?1",
                params![id],
                row_to_crop,
            )
            .optional()?;
        Ok(crop)
    }

    /// All crop rules, ordered by name.
    pub fn list_crops(&self) -> Result<Vec<Crop>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, sowing_start, sowing_end FROM crops ORDER BY name ASC")?;
        let mut rows = stmt.query([])?;
        let mut crops = Vec::new();
        while let Some(row) = rows.next()? {
            crops.push(row_to_crop(row)?);
        }
        Ok(crops)
    }

    /// Rename a crop. Returns false when the id is unknown.
    pub fn rename_crop(&self, id: i64, name: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE crops SET name = ?2 WHERE id = ?1",
            params![id, name],
        )?;
        Ok(changed > 0)
    }

    /// Replace the crop's sowing window; `None` bounds clear the restriction.
    pub fn set_season_window(
        &self,
        id: i64,
        start: Option<MonthDay>,
        end: Option<MonthDay>,
    ) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE crops SET sowing_start = ?2, sowing_end = ?3 WHERE id = ?1",
            params![
                id,
                start.map(|md| md.to_string()),
                end.map(|md| md.to_string()),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a crop and its task templates in one transaction.
    ///
    /// Already-generated events are left alone; they belong to users, not to
    /// the crop rule.
    pub fn delete_crop(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction().map_err(DatabaseError::from)?;
        tx.execute("DELETE FROM crop_tasks WHERE crop_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM crops WHERE id = ?1", params![id])?;
        tx.commit().map_err(DatabaseError::from)?;
        Ok(deleted > 0)
    }

    // === Task template CRUD ===

    /// Append a task template to a crop's sequence.
    pub fn add_task(
        &self,
        crop_id: i64,
        task_type: &str,
        day_offset: i64,
        notes: Option<&str>,
    ) -> Result<TaskTemplate> {
        self.conn.execute(
            "INSERT INTO crop_tasks (crop_id, task_type, day_offset, notes) VALUES (?1, ?2, ?3, ?4)",
            params![crop_id, task_type, day_offset, notes],
        )?;
        Ok(TaskTemplate {
            id: self.conn.last_insert_rowid(),
            crop_id,
            task_type: task_type.to_string(),
            day_offset,
            notes: notes.map(str::to_string),
        })
    }

    /// Delete a task template. Returns false when the id is unknown.
    pub fn delete_task(&self, task_id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM crop_tasks WHERE id = ?1", params![task_id])?;
        Ok(deleted > 0)
    }

    // === Custom events ===

    /// Record a user-authored event.
    pub fn add_custom_event(
        &self,
        user_id: i64,
        title: &str,
        date: NaiveDate,
        notes: &str,
    ) -> Result<CustomEvent> {
        self.conn.execute(
            "INSERT INTO custom_events (user_id, title, date, notes) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, title, format_date(date), notes],
        )?;
        Ok(CustomEvent {
            id: self.conn.last_insert_rowid(),
            user_id,
            title: title.to_string(),
            date,
            notes: notes.to_string(),
        })
    }

    /// A user's custom events, in insertion order.
    pub fn list_custom_events(&self, user_id: i64) -> Result<Vec<CustomEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, date, notes FROM custom_events
             WHERE user_id = ?1 ORDER BY id ASC",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(row_to_custom_event(row)?);
        }
        Ok(events)
    }

    /// Delete one of the user's custom events. Other users' events are out of
    /// reach.
    pub fn delete_custom_event(&self, user_id: i64, event_id: i64) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM custom_events WHERE id = ?1 AND user_id = ?2",
            params![event_id, user_id],
        )?;
        Ok(deleted > 0)
    }

    // === Generated events ===

    /// A user's generated events, in insertion order.
    pub fn list_generated_events(&self, user_id: i64) -> Result<Vec<GeneratedEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, date, notes, crop_name FROM auto_events
             WHERE user_id = ?1 ORDER BY id ASC",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(row_to_generated_event(row)?);
        }
        Ok(events)
    }

    /// Delete one of the user's generated events.
    pub fn delete_generated_event(&self, user_id: i64, event_id: i64) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM auto_events WHERE id = ?1 AND user_id = ?2",
            params![event_id, user_id],
        )?;
        Ok(deleted > 0)
    }

    /// Delete all of the user's generated events, returning how many went.
    pub fn clear_generated_events(&self, user_id: i64) -> Result<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM auto_events WHERE user_id = ?1", params![user_id])?;
        tracing::debug!(user_id, deleted, "cleared generated events");
        Ok(deleted)
    }

    // === Day view ===

    /// Both kinds of events a user has on one date.
    pub fn events_on_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<(Vec<CustomEvent>, Vec<GeneratedEvent>)> {
        let date = format_date(date);

        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, date, notes FROM custom_events
             WHERE user_id = ?1 AND date = ?2 ORDER BY id ASC",
        )?;
        let mut rows = stmt.query(params![user_id, date])?;
        let mut custom = Vec::new();
        while let Some(row) = rows.next()? {
            custom.push(row_to_custom_event(row)?);
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, date, notes, crop_name FROM auto_events
             WHERE user_id = ?1 AND date = ?2 ORDER BY id ASC",
        )?;
        let mut rows = stmt.query(params![user_id, date])?;
        let mut generated = Vec::new();
        while let Some(row) = rows.next()? {
            generated.push(row_to_generated_event(row)?);
        }

        Ok((custom, generated))
    }
}

impl CropStore for FarmDb {
    fn find_crop_by_name(&self, name: &str) -> Result<Option<Crop>> {
        let crop = self
            .conn
            .query_row(
                "SELECT id, name, sowing_start, sowing_end FROM crops WHERE name = ?1",
                params![name],
                row_to_crop,
            )
            .optional()?;
        Ok(crop)
    }

    fn list_tasks_for_crop(&self, crop_id: i64) -> Result<Vec<TaskTemplate>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, crop_id, task_type, day_offset, notes FROM crop_tasks
             WHERE crop_id = ?1 ORDER BY id ASC",
        )?;
        let mut rows = stmt.query(params![crop_id])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(row_to_task(row)?);
        }
        Ok(tasks)
    }
}

impl EventStore for FarmDb {
    fn insert_generated_batch(
        &mut self,
        user_id: i64,
        events: &[NewGeneratedEvent],
    ) -> Result<Vec<GeneratedEvent>> {
        let tx = self.conn.transaction().map_err(DatabaseError::from)?;
        let mut stored = Vec::with_capacity(events.len());
        for event in events {
            tx.execute(
                "INSERT INTO auto_events (user_id, title, date, notes, crop_name)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user_id,
                    event.title,
                    format_date(event.date),
                    event.notes,
                    event.crop_name,
                ],
            )?;
            stored.push(GeneratedEvent {
                id: tx.last_insert_rowid(),
                user_id,
                title: event.title.clone(),
                date: event.date,
                notes: event.notes.clone(),
                crop_name: event.crop_name.clone(),
            });
        }
        tx.commit().map_err(DatabaseError::from)?;
        tracing::debug!(user_id, events = stored.len(), "stored generated batch");
        Ok(stored)
    }
}
