//! Toggle cycle for a (task, date) cell.
//!
//! ```text
//!   PENDING ──> COMPLETED ──(balance >= cost)──> REST_USED ──> MISSED ──> PENDING
//!                   │                                            ^
//!                   └────────────(balance < cost)────────────────┘
//! ```
//!
//! PENDING is the absence of a log row, so reaching it means deleting the row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::rewards::rest_cost;
use crate::habit::{DailyLog, LogStatus};

/// Next status in the cycle.
///
/// `current` is `None` (or `Some(Pending)`) when the cell has no log.
/// `balance` must come from a replay of the logs as they are *before* this
/// transition.
pub fn next_status(current: Option<LogStatus>, multiplier: u32, balance: i64) -> LogStatus {
    match current.unwrap_or(LogStatus::Pending) {
        LogStatus::Pending => LogStatus::Completed,
        LogStatus::Completed => {
            if can_afford(balance, rest_cost(multiplier)) {
                LogStatus::RestUsed
            } else {
                LogStatus::Missed
            }
        }
        LogStatus::RestUsed => LogStatus::Missed,
        LogStatus::Missed => LogStatus::Pending,
    }
}

fn can_afford(balance: i64, cost: u64) -> bool {
    i64::try_from(cost).map_or(false, |cost| balance >= cost)
}

/// Storage change implied by a resolved status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "status", rename_all = "lowercase")]
pub enum LogChange {
    /// Insert the row or overwrite its status in place.
    Upsert(LogStatus),
    /// Remove the row (cell returns to pending).
    Delete,
}

impl From<LogStatus> for LogChange {
    fn from(status: LogStatus) -> Self {
        match status {
            LogStatus::Pending => LogChange::Delete,
            other => LogChange::Upsert(other),
        }
    }
}

impl LogChange {
    /// Apply this change to the (task, date) cell of `logs`.
    ///
    /// Existing rows are mutated in place so their position in the vector is
    /// kept; new rows are appended.
    pub fn apply(self, logs: &mut Vec<DailyLog>, task_id: &str, date: NaiveDate) {
        let existing = logs.iter().position(|l| l.is_for(task_id, date));
        match (self, existing) {
            (LogChange::Delete, Some(idx)) => {
                logs.remove(idx);
            }
            (LogChange::Delete, None) => {}
            (LogChange::Upsert(status), Some(idx)) => logs[idx].status = status,
            (LogChange::Upsert(status), None) => logs.push(DailyLog::new(task_id, date, status)),
        }
    }
}

/// Outcome of resolving one toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub task_id: String,
    pub date: NaiveDate,
    pub from: LogStatus,
    pub to: LogStatus,
    /// Balance the affordability check was made against.
    pub balance_before: i64,
}

impl Transition {
    /// Resolve the toggle of the (task, date) cell found in `logs`.
    pub fn resolve(
        logs: &[DailyLog],
        task_id: &str,
        multiplier: u32,
        date: NaiveDate,
        balance: i64,
    ) -> Self {
        let from = logs
            .iter()
            .find(|l| l.is_for(task_id, date))
            .map(|l| l.status)
            .unwrap_or(LogStatus::Pending);
        let to = next_status(Some(from), multiplier, balance);
        Self {
            task_id: task_id.to_string(),
            date,
            from,
            to,
            balance_before: balance,
        }
    }

    pub fn change(&self) -> LogChange {
        self.to.into()
    }
}
