//! Read-only day and week projections of the tracker.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Tracker;
use crate::habit::{LogStatus, TaskCategory};

/// A task due on a given day, with its cell status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub task_id: String,
    pub name: String,
    pub category: TaskCategory,
    pub multiplier: u32,
    pub status: LogStatus,
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCell {
    pub date: NaiveDate,
    /// Whether the task is scheduled on this weekday.
    pub due: bool,
    pub status: LogStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRow {
    pub task_id: String,
    pub name: String,
    pub current_streak: u32,
    pub cells: Vec<WeekCell>,
}

/// Monday-to-Sunday grid of active tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub balance: i64,
    pub rows: Vec<WeekRow>,
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

impl Tracker {
    /// Active tasks scheduled on `date`, in creation order.
    pub fn day_view(&self, date: NaiveDate) -> Vec<DayEntry> {
        let snapshot = self.snapshot();
        self.tasks()
            .iter()
            .filter(|t| t.is_active() && t.is_due_on(date))
            .map(|t| DayEntry {
                task_id: t.id.clone(),
                name: t.name.clone(),
                category: t.category,
                multiplier: t.multiplier,
                status: self.status_of(&t.id, date),
                current_streak: snapshot.streak(&t.id).map_or(0, |s| s.current_streak),
            })
            .collect()
    }

    /// Week grid for the week containing `date`. Paused tasks are left out.
    pub fn week_view(&self, date: NaiveDate) -> WeekView {
        let snapshot = self.snapshot();
        let start = week_start(date);
        let days: Vec<NaiveDate> = (0..7).map(|i| start + Duration::days(i)).collect();

        let rows = self
            .tasks()
            .iter()
            .filter(|t| t.is_active())
            .map(|t| WeekRow {
                task_id: t.id.clone(),
                name: t.name.clone(),
                current_streak: snapshot.streak(&t.id).map_or(0, |s| s.current_streak),
                cells: days
                    .iter()
                    .map(|d| WeekCell {
                        date: *d,
                        due: t.is_due_on(*d),
                        status: self.status_of(&t.id, *d),
                    })
                    .collect(),
            })
            .collect();

        WeekView {
            week_start: start,
            balance: snapshot.balance,
            rows,
        }
    }
}
