//! Custom event commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum EventAction {
    /// Add a custom event
    Add {
        /// Event title
        title: String,
        /// Event date (YYYY-MM-DD)
        date: NaiveDate,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Act as this user instead of the configured default
        #[arg(long)]
        user: Option<i64>,
    },
    /// List your custom events
    List {
        /// Act as this user instead of the configured default
        #[arg(long)]
        user: Option<i64>,
    },
    /// Delete one of your custom events
    Delete {
        /// Event ID
        id: i64,
        /// Act as this user instead of the configured default
        #[arg(long)]
        user: Option<i64>,
    },
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = common::open_db()?;

    match action {
        EventAction::Add {
            title,
            date,
            notes,
            user,
        } => {
            let user = common::resolve_user(user)?;
            let event = db.add_custom_event(user, &title, date, &notes)?;
            println!("Event created: {}", event.id);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::List { user } => {
            let user = common::resolve_user(user)?;
            let events = db.list_custom_events(user)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        EventAction::Delete { id, user } => {
            let user = common::resolve_user(user)?;
            if db.delete_custom_event(user, id)? {
                println!("Event deleted: {id}");
            } else {
                println!("Event not found: {id}");
            }
        }
    }
    Ok(())
}
