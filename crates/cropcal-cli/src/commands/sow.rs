//! Sowing commands: season checks and event generation.

use chrono::NaiveDate;
use clap::Subcommand;
use cropcal_core::SowingPlanner;

use super::common;

#[derive(Subcommand)]
pub enum SowAction {
    /// Check a sowing date against the crop's window
    Check {
        /// Crop name
        crop: String,
        /// Candidate sowing date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Generate and store the crop's task events for a sowing date
    Generate {
        /// Crop name
        crop: String,
        /// Sowing date (YYYY-MM-DD)
        date: NaiveDate,
        /// Act as this user instead of the configured default
        #[arg(long)]
        user: Option<i64>,
    },
}

pub fn run(action: SowAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SowAction::Check { crop, date } => {
            let planner = SowingPlanner::new(common::open_db()?);
            let verdict = planner.validate_sowing_date(&crop, date)?;
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        SowAction::Generate { crop, date, user } => {
            let user = common::resolve_user(user)?;
            let mut planner = SowingPlanner::new(common::open_db()?);
            let batch = planner.generate_events_for_sowing(user, &crop, date)?;
            println!("Generated {} events for {crop} sown on {date}", batch.len());
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
    }
    Ok(())
}
