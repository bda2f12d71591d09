//! End-to-end tests for the sowing pipeline over SQLite storage.
//!
//! These drive the real `FarmDb` through the planner: crop registration,
//! season validation, batch generation, atomicity on failure, and the merged
//! agenda view.

use chrono::NaiveDate;
use cropcal_core::agenda::{self, EventSource};
use cropcal_core::error::{CalendarError, CoreError};
use cropcal_core::storage::FarmDb;
use cropcal_core::store::CropStore;
use cropcal_core::{MonthDay, SowingPlanner};

const USER: i64 = 1;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn md(s: &str) -> MonthDay {
    s.parse().unwrap()
}

/// Fresh database seeded with a winter crop and its task sequence.
fn seeded_db() -> FarmDb {
    let db = FarmDb::open_memory().unwrap();
    let wheat = db
        .create_crop("wheat", Some(md("10-01")), Some(md("02-01")))
        .unwrap();
    db.add_task(wheat.id, "Sowing", 0, Some("use certified seed"))
        .unwrap();
    db.add_task(wheat.id, "First irrigation", 21, None).unwrap();
    db.add_task(wheat.id, "Fertilizer top dressing", 40, None)
        .unwrap();
    db.create_crop("okra", None, None).unwrap();
    db
}

#[test]
fn full_sowing_flow_persists_the_batch() {
    let mut planner = SowingPlanner::new(seeded_db());
    let batch = planner
        .generate_events_for_sowing(USER, "wheat", date(2024, 11, 25))
        .unwrap();

    assert_eq!(batch.len(), 3);
    assert_eq!(batch[0].title, "Sowing");
    assert_eq!(batch[0].date, date(2024, 11, 25));
    assert_eq!(batch[0].notes, "use certified seed");
    assert_eq!(batch[1].date, date(2024, 12, 16));
    // offset 40 from late November lands in the next year
    assert_eq!(batch[2].date, date(2025, 1, 4));
    assert!(batch.iter().all(|e| e.crop_name == "wheat"));

    let stored = planner.store().list_generated_events(USER).unwrap();
    assert_eq!(stored, batch);
}

#[test]
fn unknown_crop_leaves_the_store_unchanged() {
    let mut planner = SowingPlanner::new(seeded_db());
    let before = planner.store().list_generated_events(USER).unwrap().len();

    let err = planner
        .generate_events_for_sowing(USER, "quinoa", date(2024, 11, 25))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Calendar(CalendarError::CropNotFound { .. })
    ));

    let after = planner.store().list_generated_events(USER).unwrap().len();
    assert_eq!(before, after);
}

#[test]
fn out_of_season_date_leaves_the_store_unchanged() {
    let mut planner = SowingPlanner::new(seeded_db());

    let err = planner
        .generate_events_for_sowing(USER, "wheat", date(2024, 6, 1))
        .unwrap_err();
    match err {
        CoreError::Calendar(CalendarError::OutOfSeason { crop, window }) => {
            assert_eq!(crop, "wheat");
            assert_eq!(window.start, md("10-01"));
            assert_eq!(window.end, md("02-01"));
        }
        other => panic!("expected OutOfSeason, got {other}"),
    }

    assert!(planner.store().list_generated_events(USER).unwrap().is_empty());
}

#[test]
fn validation_only_does_not_write() {
    let planner = SowingPlanner::new(seeded_db());
    let verdict = planner
        .validate_sowing_date("wheat", date(2025, 1, 15))
        .unwrap();
    assert!(verdict.in_season);

    let verdict = planner
        .validate_sowing_date("okra", date(2024, 6, 1))
        .unwrap();
    assert!(verdict.in_season);
    assert!(verdict.window.is_none());

    assert!(planner.store().list_generated_events(USER).unwrap().is_empty());
}

#[test]
fn resowing_appends_a_second_equal_batch() {
    let mut planner = SowingPlanner::new(seeded_db());
    let first = planner
        .generate_events_for_sowing(USER, "wheat", date(2024, 11, 25))
        .unwrap();
    let second = planner
        .generate_events_for_sowing(USER, "wheat", date(2024, 11, 25))
        .unwrap();

    // same content, fresh rows: 2 x N events in the store
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!((&a.title, a.date), (&b.title, b.date));
        assert_ne!(a.id, b.id);
    }
    let stored = planner.store().list_generated_events(USER).unwrap();
    assert_eq!(stored.len(), first.len() * 2);
}

#[test]
fn batches_are_attributed_to_the_requesting_user() {
    let mut planner = SowingPlanner::new(seeded_db());
    planner
        .generate_events_for_sowing(1, "wheat", date(2024, 11, 25))
        .unwrap();
    planner
        .generate_events_for_sowing(2, "wheat", date(2024, 12, 1))
        .unwrap();

    let db = planner.store();
    assert_eq!(db.list_generated_events(1).unwrap().len(), 3);
    assert_eq!(db.list_generated_events(2).unwrap().len(), 3);
    assert!(db
        .list_generated_events(1)
        .unwrap()
        .iter()
        .all(|e| e.user_id == 1));
}

#[test]
fn crop_without_templates_sows_into_an_empty_batch() {
    let mut planner = SowingPlanner::new(seeded_db());
    let batch = planner
        .generate_events_for_sowing(USER, "okra", date(2024, 6, 1))
        .unwrap();
    assert!(batch.is_empty());
    assert!(planner.store().list_generated_events(USER).unwrap().is_empty());
}

#[test]
fn deleting_the_crop_rule_keeps_generated_history() {
    let mut planner = SowingPlanner::new(seeded_db());
    planner
        .generate_events_for_sowing(USER, "wheat", date(2024, 11, 25))
        .unwrap();

    let mut db = planner.into_store();
    let wheat = db.find_crop_by_name("wheat").unwrap().unwrap();
    assert!(db.delete_crop(wheat.id).unwrap());

    assert!(db.list_tasks_for_crop(wheat.id).unwrap().is_empty());
    assert_eq!(db.list_generated_events(USER).unwrap().len(), 3);
}

#[test]
fn agenda_merges_custom_and_generated_events() {
    let mut planner = SowingPlanner::new(seeded_db());
    planner
        .generate_events_for_sowing(USER, "wheat", date(2024, 11, 25))
        .unwrap();
    let db = planner.into_store();
    db.add_custom_event(USER, "Tractor service", date(2024, 12, 16), "")
        .unwrap();

    let today = date(2024, 12, 1);
    let entries = agenda::assemble(
        db.list_custom_events(USER).unwrap(),
        db.list_generated_events(USER).unwrap(),
        today,
    );

    // the sowing event itself (Nov 25) is already past
    let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Tractor service", "First irrigation", "Fertilizer top dressing"]
    );
    assert_eq!(entries[0].source, EventSource::Custom);
    assert_eq!(
        entries[1].source,
        EventSource::Generated {
            crop_name: "wheat".to_string()
        }
    );
}
