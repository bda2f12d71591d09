//! Merged calendar views: upcoming agenda and single-day listing.

use chrono::{Local, NaiveDate};
use cropcal_core::agenda;

use super::common;

pub fn run(on: Option<NaiveDate>, user: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let db = common::open_db()?;
    let user = common::resolve_user(user)?;

    match on {
        // day view: everything on one date, past or not
        Some(date) => {
            let (custom, generated) = db.events_on_date(user, date)?;
            let entries = agenda::assemble(custom, generated, date);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        // upcoming view: today and later, merged and sorted
        None => {
            let today = Local::now().date_naive();
            let entries = agenda::assemble(
                db.list_custom_events(user)?,
                db.list_generated_events(user)?,
                today,
            );
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
