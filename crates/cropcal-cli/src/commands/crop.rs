//! Crop rule management commands for CLI.

use clap::Subcommand;
use cropcal_core::season::MonthDay;
use cropcal_core::store::CropStore;

use super::common;

#[derive(Subcommand)]
pub enum CropAction {
    /// Register a crop, optionally with a sowing window
    Add {
        /// Crop name (unique)
        name: String,
        /// Window start as MM-DD
        #[arg(long)]
        sowing_start: Option<MonthDay>,
        /// Window end as MM-DD (may precede the start for windows that wrap
        /// the year, e.g. 10-01 to 02-01)
        #[arg(long)]
        sowing_end: Option<MonthDay>,
    },
    /// List crop rules
    List,
    /// Show one crop with its task templates
    Get {
        /// Crop name
        name: String,
    },
    /// Rename a crop
    Rename {
        /// Crop ID
        id: i64,
        /// New name
        name: String,
    },
    /// Change or clear the sowing window
    SetSeason {
        /// Crop ID
        id: i64,
        /// New window start as MM-DD (omit both bounds to clear)
        #[arg(long)]
        start: Option<MonthDay>,
        /// New window end as MM-DD
        #[arg(long)]
        end: Option<MonthDay>,
    },
    /// Delete a crop and its task templates
    Delete {
        /// Crop ID
        id: i64,
    },
}

pub fn run(action: CropAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = common::open_db()?;

    match action {
        CropAction::Add {
            name,
            sowing_start,
            sowing_end,
        } => {
            let crop = db.create_crop(&name, sowing_start, sowing_end)?;
            println!("Crop created: {}", crop.id);
            println!("{}", serde_json::to_string_pretty(&crop)?);
        }
        CropAction::List => {
            let crops = db.list_crops()?;
            println!("{}", serde_json::to_string_pretty(&crops)?);
        }
        CropAction::Get { name } => match db.find_crop_by_name(&name)? {
            Some(crop) => {
                let tasks = db.list_tasks_for_crop(crop.id)?;
                println!("{}", serde_json::to_string_pretty(&crop)?);
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            }
            None => println!("Crop not found: {name}"),
        },
        CropAction::Rename { id, name } => {
            if db.rename_crop(id, &name)? {
                println!("Crop renamed: {id}");
            } else {
                println!("Crop not found: {id}");
            }
        }
        CropAction::SetSeason { id, start, end } => {
            if db.set_season_window(id, start, end)? {
                println!("Season window updated: {id}");
            } else {
                println!("Crop not found: {id}");
            }
        }
        CropAction::Delete { id } => {
            if db.delete_crop(id)? {
                println!("Crop deleted: {id}");
            } else {
                println!("Crop not found: {id}");
            }
        }
    }
    Ok(())
}
