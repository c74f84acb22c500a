//! Daily outcome commands.

use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use streakflow_core::{LogChange, LogStatus, Transition};

use super::{date_or_today, open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum LogAction {
    /// Advance a cell through Pending -> Completed -> Rest/Missed -> Pending
    Toggle {
        /// Task ID
        task_id: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Write a status directly, without the rest affordability check
    Set {
        /// Task ID
        task_id: String,
        /// completed, missed, rest_used or pending
        status: LogStatus,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Clear a cell back to pending
    Clear {
        /// Task ID
        task_id: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List logs in date order
    List {
        /// Only logs of this task
        #[arg(long)]
        task: Option<String>,
        /// Earliest date (inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date (inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Habits due on a day with their status
    Day {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Monday-to-Sunday grid for the week containing a date
    Week {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
struct ToggleOutput {
    #[serde(flatten)]
    transition: Transition,
    balance_after: i64,
}

#[derive(Serialize)]
struct SetOutput {
    task_id: String,
    date: NaiveDate,
    change: LogChange,
    balance_after: i64,
}

pub fn run(action: LogAction) -> CmdResult {
    let (db, mut tracker) = open_tracker()?;

    match action {
        LogAction::Toggle { task_id, date } => {
            let transition = tracker.toggle(&task_id, date_or_today(date))?;
            tracker.save(&db)?;
            print_json(&ToggleOutput {
                transition,
                balance_after: tracker.balance(),
            })?;
        }
        LogAction::Set { task_id, status, date } => {
            let date = date_or_today(date);
            let change = tracker.set_status(&task_id, date, status)?;
            tracker.save(&db)?;
            print_json(&SetOutput {
                task_id,
                date,
                change,
                balance_after: tracker.balance(),
            })?;
        }
        LogAction::Clear { task_id, date } => {
            let date = date_or_today(date);
            let change = tracker.set_status(&task_id, date, LogStatus::Pending)?;
            tracker.save(&db)?;
            print_json(&SetOutput {
                task_id,
                date,
                change,
                balance_after: tracker.balance(),
            })?;
        }
        LogAction::List { task, from, to } => {
            let mut logs: Vec<_> = tracker
                .logs()
                .iter()
                .filter(|l| task.as_deref().map_or(true, |id| l.task_id == id))
                .filter(|l| from.map_or(true, |f| l.date >= f))
                .filter(|l| to.map_or(true, |t| l.date <= t))
                .collect();
            logs.sort_by_key(|l| l.date);
            print_json(&logs)?;
        }
        LogAction::Day { date } => {
            print_json(&tracker.day_view(date_or_today(date)))?;
        }
        LogAction::Week { date } => {
            print_json(&tracker.week_view(date_or_today(date)))?;
        }
    }
    Ok(())
}
