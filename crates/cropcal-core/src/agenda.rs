//! Merged calendar view of custom and generated events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{CustomEvent, GeneratedEvent};

/// Where an agenda entry came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// Authored directly by the user
    Custom,
    /// Expanded from a crop's task templates
    Generated { crop_name: String },
}

/// One row of the merged calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
    pub source: EventSource,
}

impl From<CustomEvent> for AgendaEntry {
    fn from(event: CustomEvent) -> Self {
        Self {
            id: event.id,
            title: event.title,
            date: event.date,
            notes: event.notes,
            source: EventSource::Custom,
        }
    }
}

impl From<GeneratedEvent> for AgendaEntry {
    fn from(event: GeneratedEvent) -> Self {
        Self {
            id: event.id,
            title: event.title,
            date: event.date,
            notes: event.notes,
            source: EventSource::Generated {
                crop_name: event.crop_name,
            },
        }
    }
}

/// Merge custom and generated events into a single present-and-future agenda.
///
/// Entries dated before `today` are dropped; `today` itself is kept. The
/// result is sorted by date ascending, with custom entries ahead of generated
/// ones on the same date.
pub fn assemble(
    custom: Vec<CustomEvent>,
    generated: Vec<GeneratedEvent>,
    today: NaiveDate,
) -> Vec<AgendaEntry> {
    let mut entries: Vec<AgendaEntry> = custom
        .into_iter()
        .filter(|e| e.date >= today)
        .map(AgendaEntry::from)
        .chain(
            generated
                .into_iter()
                .filter(|e| e.date >= today)
                .map(AgendaEntry::from),
        )
        .collect();
    // Stable sort keeps custom entries ahead of generated ones on ties.
    entries.sort_by_key(|e| e.date);
    entries
}
