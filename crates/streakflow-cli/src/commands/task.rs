//! Habit management commands for CLI.

use clap::Subcommand;
use streakflow_core::habit::parse_days;
use streakflow_core::{Config, NewTask, TaskCategory, TaskPatch, TaskStatus};

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new habit
    Create {
        /// Habit name
        name: String,
        /// Category: gym, content, study, health, business, other
        #[arg(long, default_value = "other")]
        category: TaskCategory,
        /// Comma-separated weekday indices, 0=Sun .. 6=Sat (default from config)
        #[arg(long)]
        days: Option<String>,
        /// Importance weight 1-10 (default from config)
        #[arg(long)]
        multiplier: Option<u32>,
        /// Create the habit paused
        #[arg(long)]
        paused: bool,
    },
    /// List habits
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<TaskCategory>,
        /// Filter by status (active or paused)
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Get habit details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a habit
    Update {
        /// Task ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<TaskCategory>,
        /// New comma-separated weekday indices
        #[arg(long)]
        days: Option<String>,
        /// New multiplier
        #[arg(long)]
        multiplier: Option<u32>,
        /// New status (active or paused)
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Delete a habit and all of its logs
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, config: &Config) -> CmdResult {
    let (db, mut tracker) = open_tracker()?;

    match action {
        TaskAction::Create {
            name,
            category,
            days,
            multiplier,
            paused,
        } => {
            let active_days = match days {
                Some(d) => parse_days(&d)?,
                None => config.tasks.default_active_days.clone(),
            };
            let task = tracker
                .create_task(NewTask {
                    name,
                    category,
                    active_days,
                    multiplier: multiplier.unwrap_or(config.tasks.default_multiplier),
                    status: if paused { TaskStatus::Paused } else { TaskStatus::Active },
                })?
                .clone();
            tracker.save(&db)?;
            println!("Task created: {}", task.id);
            print_json(&task)?;
        }
        TaskAction::List { category, status } => {
            let filtered: Vec<_> = tracker
                .tasks()
                .iter()
                .filter(|t| category.map_or(true, |c| t.category == c))
                .filter(|t| status.map_or(true, |s| t.status == s))
                .collect();
            print_json(&filtered)?;
        }
        TaskAction::Get { id } => match tracker.task(&id) {
            Some(task) => print_json(task)?,
            None => return Err(format!("Task not found: {id}").into()),
        },
        TaskAction::Update {
            id,
            name,
            category,
            days,
            multiplier,
            status,
        } => {
            let patch = TaskPatch {
                name,
                category,
                active_days: days.as_deref().map(parse_days).transpose()?,
                multiplier,
                status,
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            let task = tracker.update_task(&id, patch)?.clone();
            tracker.save(&db)?;
            println!("Task updated:");
            print_json(&task)?;
        }
        TaskAction::Delete { id } => {
            let (task, removed) = tracker.delete_task(&id)?;
            tracker.save(&db)?;
            println!("Task deleted: {} ({} logs removed)", task.id, removed);
        }
    }
    Ok(())
}
