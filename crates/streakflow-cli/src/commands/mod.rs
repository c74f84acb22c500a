pub mod config;
pub mod log;
pub mod stats;
pub mod task;

use chrono::{Local, NaiveDate};
use streakflow_core::{Database, Tracker};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the default database and load the tracker from it.
pub fn open_tracker() -> Result<(Database, Tracker), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let tracker = Tracker::load(&db)?;
    Ok((db, tracker))
}

/// `date` or today's local date.
pub fn date_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
