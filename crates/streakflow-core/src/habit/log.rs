//! Daily outcome records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Outcome of a task on a calendar day.
///
/// `Pending` is never stored: a pending cell is the absence of a log row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogStatus {
    Completed,
    Missed,
    RestUsed,
    Pending,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Completed => "COMPLETED",
            LogStatus::Missed => "MISSED",
            LogStatus::RestUsed => "REST_USED",
            LogStatus::Pending => "PENDING",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "completed" | "done" => Ok(LogStatus::Completed),
            "missed" => Ok(LogStatus::Missed),
            "rest_used" | "rest" => Ok(LogStatus::RestUsed),
            "pending" => Ok(LogStatus::Pending),
            _ => Err(ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!("unknown log status '{s}'"),
            }),
        }
    }
}

/// One outcome for a (task, date) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyLog {
    pub task_id: String,
    pub date: NaiveDate,
    pub status: LogStatus,
}

impl DailyLog {
    pub fn new(task_id: impl Into<String>, date: NaiveDate, status: LogStatus) -> Self {
        Self {
            task_id: task_id.into(),
            date,
            status,
        }
    }

    pub fn is_for(&self, task_id: &str, date: NaiveDate) -> bool {
        self.task_id == task_id && self.date == date
    }
}
