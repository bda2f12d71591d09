//! Task template management commands for CLI.

use clap::Subcommand;
use cropcal_core::store::CropStore;

use super::common;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task template to a crop
    Add {
        /// Crop name
        crop: String,
        /// Task label (e.g. "First irrigation")
        task_type: String,
        /// Days from the sowing date (negative for tasks before sowing)
        #[arg(long, allow_negative_numbers = true)]
        offset: i64,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List a crop's task templates in definition order
    List {
        /// Crop name
        crop: String,
    },
    /// Delete a task template
    Delete {
        /// Task ID
        id: i64,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = common::open_db()?;

    match action {
        TaskAction::Add {
            crop,
            task_type,
            offset,
            notes,
        } => match db.find_crop_by_name(&crop)? {
            Some(found) => {
                let task = db.add_task(found.id, &task_type, offset, notes.as_deref())?;
                println!("Task created: {}", task.id);
                println!("{}", serde_json::to_string_pretty(&task)?);
            }
            None => println!("Crop not found: {crop}"),
        },
        TaskAction::List { crop } => match db.find_crop_by_name(&crop)? {
            Some(found) => {
                let tasks = db.list_tasks_for_crop(found.id)?;
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            }
            None => println!("Crop not found: {crop}"),
        },
        TaskAction::Delete { id } => {
            if db.delete_task(id)? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }
    Ok(())
}
