//! Habit definitions tracked against a weekly schedule.
//!
//! A [`Task`] is a recurring habit. It is due on the weekdays listed in
//! `active_days` (0=Sun ... 6=Sat) and weighs into the rest point economy
//! through its `multiplier`.

mod log;

pub use log::{DailyLog, LogStatus};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lower bound for a task multiplier accepted by the service layer.
pub const MIN_MULTIPLIER: u32 = 1;
/// Upper bound for a task multiplier accepted by the service layer.
pub const MAX_MULTIPLIER: u32 = 10;

/// Closed set of habit categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskCategory {
    Gym,
    Content,
    Study,
    Health,
    Business,
    Other,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 6] = [
        TaskCategory::Gym,
        TaskCategory::Content,
        TaskCategory::Study,
        TaskCategory::Health,
        TaskCategory::Business,
        TaskCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Gym => "Gym",
            TaskCategory::Content => "Content",
            TaskCategory::Study => "Study",
            TaskCategory::Health => "Health",
            TaskCategory::Business => "Business",
            TaskCategory::Other => "Other",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "category".to_string(),
                message: format!("unknown category '{s}'"),
            })
    }
}

/// Lifecycle status of a task.
///
/// Paused tasks keep their history; the engine replays their logs like any
/// other task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Active,
    Paused,
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(TaskStatus::Active),
            "paused" => Ok(TaskStatus::Paused),
            other => Err(ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!("expected 'active' or 'paused', got '{other}'"),
            }),
        }
    }
}

/// A recurring habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub category: TaskCategory,
    /// Weekday indices the task is due on, 0=Sun ... 6=Sat.
    pub active_days: Vec<u8>,
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    #[serde(default)]
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

fn default_multiplier() -> u32 {
    1
}

impl Task {
    /// Whether the task is scheduled on the weekday of `date`.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday().num_days_from_sunday() as u8;
        self.active_days.contains(&weekday)
    }

    pub fn is_active(&self) -> bool {
        self.status == TaskStatus::Active
    }
}

/// Fields supplied when creating a task. The id and creation timestamp are
/// assigned by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    pub category: TaskCategory,
    pub active_days: Vec<u8>,
    pub multiplier: u32,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Partial update applied in place to an existing task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub category: Option<TaskCategory>,
    pub active_days: Option<Vec<u8>>,
    pub multiplier: Option<u32>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.active_days.is_none()
            && self.multiplier.is_none()
            && self.status.is_none()
    }

    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(days) = self.active_days {
            task.active_days = normalize_days(days);
        }
        if let Some(multiplier) = self.multiplier {
            task.multiplier = multiplier;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

/// Sort and dedupe weekday indices.
pub fn normalize_days(mut days: Vec<u8>) -> Vec<u8> {
    days.sort_unstable();
    days.dedup();
    days
}

/// Parse a comma-separated weekday list such as `"1,2,3"`.
pub fn parse_days(s: &str) -> Result<Vec<u8>, ValidationError> {
    let mut days = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day: u8 = part.parse().map_err(|_| ValidationError::InvalidValue {
            field: "active_days".to_string(),
            message: format!("'{part}' is not a weekday index"),
        })?;
        days.push(day);
    }
    validate_days(&days)?;
    Ok(normalize_days(days))
}

pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty("name".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_multiplier(multiplier: u32) -> Result<(), ValidationError> {
    if !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&multiplier) {
        return Err(ValidationError::MultiplierOutOfRange {
            value: multiplier,
            min: MIN_MULTIPLIER,
            max: MAX_MULTIPLIER,
        });
    }
    Ok(())
}

pub(crate) fn validate_days(days: &[u8]) -> Result<(), ValidationError> {
    match days.iter().find(|d| **d > 6) {
        Some(bad) => Err(ValidationError::InvalidWeekday(*bad)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(days: Vec<u8>) -> Task {
        Task {
            id: "t1".to_string(),
            name: "Lift".to_string(),
            category: TaskCategory::Gym,
            active_days: days,
            multiplier: 1,
            status: TaskStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn due_on_uses_sunday_zero() {
        let t = task(vec![0, 6]);
        // 2024-01-07 is a Sunday, 2024-01-08 a Monday
        assert!(t.is_due_on(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
        assert!(!t.is_due_on(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()));
        assert!(t.is_due_on(NaiveDate::from_ymd_opt(2024, 1, 13).unwrap()));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("gym".parse::<TaskCategory>().unwrap(), TaskCategory::Gym);
        assert_eq!(" Business ".parse::<TaskCategory>().unwrap(), TaskCategory::Business);
        assert!("cooking".parse::<TaskCategory>().is_err());
    }

    #[test]
    fn parse_days_sorts_and_rejects_out_of_range() {
        assert_eq!(parse_days("5,1,3,1").unwrap(), vec![1, 3, 5]);
        assert_eq!(parse_days("").unwrap(), Vec::<u8>::new());
        assert_eq!(parse_days("1,7"), Err(ValidationError::InvalidWeekday(7)));
        assert!(parse_days("mon").is_err());
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut t = task(vec![1]);
        TaskPatch {
            multiplier: Some(3),
            active_days: Some(vec![5, 2, 2]),
            ..Default::default()
        }
        .apply(&mut t);
        assert_eq!(t.multiplier, 3);
        assert_eq!(t.active_days, vec![2, 5]);
        assert_eq!(t.name, "Lift");
    }

    #[test]
    fn multiplier_bounds() {
        assert!(validate_multiplier(1).is_ok());
        assert!(validate_multiplier(10).is_ok());
        assert!(validate_multiplier(0).is_err());
        assert!(validate_multiplier(11).is_err());
    }

    #[test]
    fn task_serialization() {
        let t = task(vec![1, 2, 3]);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"category\":\"Gym\""));
        assert!(json.contains("\"status\":\"active\""));
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, t);
    }
}
