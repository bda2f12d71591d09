//! Generated event commands for CLI.
//!
//! Generated events are created only by `sow generate`; these commands list
//! and remove them.

use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum AutoAction {
    /// List your generated events
    List {
        /// Act as this user instead of the configured default
        #[arg(long)]
        user: Option<i64>,
    },
    /// Delete one of your generated events
    Delete {
        /// Event ID
        id: i64,
        /// Act as this user instead of the configured default
        #[arg(long)]
        user: Option<i64>,
    },
    /// Delete all of your generated events
    Clear {
        /// Act as this user instead of the configured default
        #[arg(long)]
        user: Option<i64>,
    },
}

pub fn run(action: AutoAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = common::open_db()?;

    match action {
        AutoAction::List { user } => {
            let user = common::resolve_user(user)?;
            let events = db.list_generated_events(user)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        AutoAction::Delete { id, user } => {
            let user = common::resolve_user(user)?;
            if db.delete_generated_event(user, id)? {
                println!("Event deleted: {id}");
            } else {
                println!("Event not found: {id}");
            }
        }
        AutoAction::Clear { user } => {
            let user = common::resolve_user(user)?;
            let deleted = db.clear_generated_events(user)?;
            println!("Deleted {deleted} generated events");
        }
    }
    Ok(())
}
