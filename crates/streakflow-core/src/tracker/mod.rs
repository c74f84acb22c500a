//! Tracker service: owner of the raw task and log collections.
//!
//! The tracker is the single writer of tasks and logs. It performs task CRUD
//! (with cascading delete), drives the toggle cycle and replays the engine
//! whenever derived state is needed. Every toggle replays first to read a
//! fresh balance, then applies exactly one mutation; there is no batch path.

mod view;

pub use view::{week_start, DayEntry, WeekCell, WeekRow, WeekView};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::engine::{self, EngineOutput, LogChange, Transition};
use crate::error::{CoreError, Result};
use crate::habit::{self, DailyLog, LogStatus, NewTask, Task, TaskPatch};
use crate::stats::{Dashboard, DashboardAnalyzer};
use crate::storage::Database;

/// In-memory tracker state.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    tasks: Vec<Task>,
    logs: Vec<DailyLog>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw collections as loaded from storage.
    pub fn from_parts(tasks: Vec<Task>, logs: Vec<DailyLog>) -> Self {
        Self { tasks, logs }
    }

    /// Load both slots from the database.
    pub fn load(db: &Database) -> Result<Self> {
        let tracker = Self::from_parts(db.load_tasks()?, db.load_logs()?);
        tracing::debug!(
            tasks = tracker.tasks.len(),
            logs = tracker.logs.len(),
            "loaded tracker state"
        );
        Ok(tracker)
    }

    /// Persist both slots verbatim.
    pub fn save(&self, db: &Database) -> Result<()> {
        db.save_all(&self.tasks, &self.logs)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn logs(&self) -> &[DailyLog] {
        &self.logs
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn require_task(&self, id: &str) -> Result<&Task> {
        self.task(id).ok_or_else(|| CoreError::TaskNotFound(id.to_string()))
    }

    /// Replay the engine over the current collections.
    pub fn snapshot(&self) -> EngineOutput {
        engine::replay(&self.tasks, &self.logs)
    }

    pub fn balance(&self) -> i64 {
        self.snapshot().balance
    }

    /// Dashboard report as of `today`.
    pub fn dashboard(&self, analyzer: &DashboardAnalyzer, today: NaiveDate) -> Dashboard {
        analyzer.analyze(&self.tasks, &self.logs, &self.snapshot(), today)
    }

    /// Create a task with a fresh id and creation timestamp.
    ///
    /// # Errors
    /// Returns a validation error for an empty name, a multiplier outside
    /// 1..=10 or a weekday index above 6.
    pub fn create_task(&mut self, new: NewTask) -> Result<&Task> {
        habit::validate_name(&new.name)?;
        habit::validate_multiplier(new.multiplier)?;
        habit::validate_days(&new.active_days)?;

        let task = Task {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            category: new.category,
            active_days: habit::normalize_days(new.active_days),
            multiplier: new.multiplier,
            status: new.status,
            created_at: Utc::now(),
        };
        tracing::info!(task_id = %task.id, name = %task.name, "created task");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Patch a task in place.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<&Task> {
        if let Some(name) = &patch.name {
            habit::validate_name(name)?;
        }
        if let Some(multiplier) = patch.multiplier {
            habit::validate_multiplier(multiplier)?;
        }
        if let Some(days) = &patch.active_days {
            habit::validate_days(days)?;
        }

        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        patch.apply(&mut self.tasks[idx]);
        tracing::info!(task_id = %id, "updated task");
        Ok(&self.tasks[idx])
    }

    /// Delete a task and every log that references it.
    ///
    /// Returns the removed task and the number of logs removed with it.
    pub fn delete_task(&mut self, id: &str) -> Result<(Task, usize)> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        let task = self.tasks.remove(idx);

        let before = self.logs.len();
        self.logs.retain(|l| l.task_id != id);
        let removed = before - self.logs.len();

        tracing::info!(task_id = %id, removed_logs = removed, "deleted task");
        Ok((task, removed))
    }

    /// Status of a (task, date) cell; `Pending` when no log exists.
    pub fn status_of(&self, task_id: &str, date: NaiveDate) -> LogStatus {
        self.logs
            .iter()
            .find(|l| l.is_for(task_id, date))
            .map(|l| l.status)
            .unwrap_or(LogStatus::Pending)
    }

    /// Logs of one task in date order.
    pub fn logs_for(&self, task_id: &str) -> Vec<&DailyLog> {
        let mut logs: Vec<_> = self.logs.iter().filter(|l| l.task_id == task_id).collect();
        logs.sort_by_key(|l| l.date);
        logs
    }

    /// Advance a cell one step through the toggle cycle.
    ///
    /// The affordability of a rest is checked against the balance replayed
    /// from the logs as they stand before this call.
    pub fn toggle(&mut self, task_id: &str, date: NaiveDate) -> Result<Transition> {
        let task = self.require_task(task_id)?;
        if !task.is_due_on(date) {
            tracing::warn!(task_id, %date, "toggling a task on a day it is not scheduled");
        }
        let multiplier = task.multiplier;

        let balance = self.balance();
        let transition = Transition::resolve(&self.logs, task_id, multiplier, date, balance);
        transition.change().apply(&mut self.logs, task_id, date);

        tracing::debug!(
            task_id,
            %date,
            from = %transition.from,
            to = %transition.to,
            balance,
            "toggled log"
        );
        Ok(transition)
    }

    /// Write a status directly, bypassing the affordability gate.
    ///
    /// `Pending` deletes the cell. A forced rest may drive the balance
    /// negative; the ledger simply reflects it.
    pub fn set_status(&mut self, task_id: &str, date: NaiveDate, status: LogStatus) -> Result<LogChange> {
        self.require_task(task_id)?;
        let change = LogChange::from(status);
        change.apply(&mut self.logs, task_id, date);
        tracing::debug!(task_id, %date, %status, "set log status");
        Ok(change)
    }
}
