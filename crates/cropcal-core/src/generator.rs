//! Expansion of task templates into dated calendar events.

use chrono::{Days, NaiveDate};

use crate::error::CalendarError;
use crate::model::{NewGeneratedEvent, TaskTemplate};

/// Add a signed day offset to a date.
///
/// # Errors
/// Returns `CalendarError::DateOutOfRange` when the offset leaves chrono's
/// representable calendar.
pub fn offset_date(date: NaiveDate, days: i64) -> Result<NaiveDate, CalendarError> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or(CalendarError::DateOutOfRange { date, offset: days })
}

/// Expand a crop's task templates into one event per template.
///
/// Events keep template order. Each date is `sowing_date + day_offset`, with
/// month and year rollover handled by calendar arithmetic. Templates without
/// notes produce events with empty notes; `crop_name` is fixed for the whole
/// batch. The expansion is deliberately not deduplicated: calling this twice
/// with the same inputs yields two equal, independent batches. Zero templates
/// expand to an empty batch.
pub fn expand_templates(
    crop_name: &str,
    sowing_date: NaiveDate,
    templates: &[TaskTemplate],
) -> Result<Vec<NewGeneratedEvent>, CalendarError> {
    let mut events = Vec::with_capacity(templates.len());
    for template in templates {
        events.push(NewGeneratedEvent {
            title: template.task_type.clone(),
            date: offset_date(sowing_date, template.day_offset)?,
            notes: template.notes.clone().unwrap_or_default(),
            crop_name: crop_name.to_string(),
        });
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: i64, task_type: &str, day_offset: i64, notes: Option<&str>) -> TaskTemplate {
        TaskTemplate {
            id,
            crop_id: 1,
            task_type: task_type.to_string(),
            day_offset,
            notes: notes.map(str::to_string),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_event_per_template_in_template_order() {
        let templates = vec![
            template(1, "Sowing", 0, Some("use certified seed")),
            template(2, "First irrigation", 7, None),
            template(3, "Fertilizer", 21, Some("urea top dressing")),
        ];
        let events = expand_templates("wheat", date(2024, 6, 1), &templates).unwrap();

        assert_eq!(events.len(), templates.len());
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Sowing", "First irrigation", "Fertilizer"]);
        assert_eq!(events[0].date, date(2024, 6, 1));
        assert_eq!(events[1].date, date(2024, 6, 8));
        assert_eq!(events[2].date, date(2024, 6, 22));
        assert!(events.iter().all(|e| e.crop_name == "wheat"));
    }

    #[test]
    fn missing_notes_become_empty_string() {
        let events =
            expand_templates("rice", date(2024, 7, 1), &[template(1, "Weeding", 14, None)])
                .unwrap();
        assert_eq!(events[0].notes, "");
    }

    #[test]
    fn offset_crosses_month_boundary() {
        let events =
            expand_templates("wheat", date(2024, 1, 1), &[template(1, "Harvest", 40, None)])
                .unwrap();
        assert_eq!(events[0].date, date(2024, 2, 10));
    }

    #[test]
    fn offset_crosses_year_boundary() {
        let events =
            expand_templates("wheat", date(2024, 11, 25), &[template(1, "Harvest", 40, None)])
                .unwrap();
        assert_eq!(events[0].date, date(2025, 1, 4));
    }

    #[test]
    fn negative_offset_lands_before_sowing() {
        let events = expand_templates(
            "wheat",
            date(2024, 6, 10),
            &[template(1, "Seed-bed preparation", -7, None)],
        )
        .unwrap();
        assert_eq!(events[0].date, date(2024, 6, 3));
    }

    #[test]
    fn no_templates_expand_to_empty_batch() {
        let events = expand_templates("fallow", date(2024, 6, 1), &[]).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn repeated_expansion_is_equal_but_independent() {
        let templates = vec![template(1, "Sowing", 0, None), template(2, "Weeding", 10, None)];
        let first = expand_templates("maize", date(2024, 5, 5), &templates).unwrap();
        let second = expand_templates("maize", date(2024, 5, 5), &templates).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn absurd_offset_reports_out_of_range() {
        let err = expand_templates(
            "wheat",
            date(2024, 1, 1),
            &[template(1, "Harvest", i64::MAX, None)],
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::DateOutOfRange { .. }));
    }
}
