//! Deterministic replay of daily logs into streaks and the RP ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::rewards::{milestone_reward, rest_cost};
use crate::habit::{DailyLog, LogStatus, Task};

/// Streak statistics for one task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub task_id: String,
    /// Completions since the last miss. Rest days neither extend nor break it.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completed: u32,
    pub total_missed: u32,
    pub total_rest_used: u32,
}

impl StreakInfo {
    fn new(task_id: &str) -> Self {
        Self {
            task_id: task_id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Earned,
    Spent,
}

/// One entry of the rest point ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestTransaction {
    /// `earn-<task>-<date>` or `spend-<task>-<date>`; stable across replays.
    pub id: String,
    /// Task the entry was produced for.
    pub task_id: String,
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub reason: String,
    pub date: NaiveDate,
}

impl RestTransaction {
    fn earned(task: &Task, date: NaiveDate, streak: u32, amount: u64) -> Self {
        Self {
            id: format!("earn-{}-{}", task.id, date),
            task_id: task.id.clone(),
            amount,
            kind: TransactionType::Earned,
            reason: format!("Milestone: {streak} day streak ({})", task.name),
            date,
        }
    }

    fn spent(task: &Task, date: NaiveDate, amount: u64) -> Self {
        Self {
            id: format!("spend-{}-{}", task.id, date),
            task_id: task.id.clone(),
            amount,
            kind: TransactionType::Spent,
            reason: format!("Rest usage: {}", task.name),
            date,
        }
    }

    /// Signed effect on the balance.
    pub fn signed_amount(&self) -> i64 {
        let amount = i64::try_from(self.amount).unwrap_or(i64::MAX);
        match self.kind {
            TransactionType::Earned => amount,
            TransactionType::Spent => -amount,
        }
    }
}

/// Everything derived from one replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOutput {
    /// Keyed by task id. Ordered so serialized output is stable.
    pub streaks: BTreeMap<String, StreakInfo>,
    /// Ledger in replay order.
    pub transactions: Vec<RestTransaction>,
    pub balance: i64,
}

impl EngineOutput {
    pub fn streak(&self, task_id: &str) -> Option<&StreakInfo> {
        self.streaks.get(task_id)
    }

    pub fn earned_total(&self) -> u64 {
        self.total_of(TransactionType::Earned)
    }

    pub fn spent_total(&self) -> u64 {
        self.total_of(TransactionType::Spent)
    }

    fn total_of(&self, kind: TransactionType) -> u64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .fold(0u64, |acc, t| acc.saturating_add(t.amount))
    }
}

/// Rebuild streaks, ledger and balance from scratch.
///
/// Logs are processed in ascending date order; logs sharing a date keep their
/// input order. Logs whose task no longer exists are skipped. Neither input is
/// modified.
pub fn replay(tasks: &[Task], logs: &[DailyLog]) -> EngineOutput {
    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut out = EngineOutput {
        streaks: tasks
            .iter()
            .map(|t| (t.id.clone(), StreakInfo::new(&t.id)))
            .collect(),
        ..Default::default()
    };

    let mut ordered: Vec<&DailyLog> = logs.iter().collect();
    ordered.sort_by_key(|l| l.date);

    let mut skipped = 0usize;
    for log in ordered {
        let (Some(task), Some(streak)) = (
            by_id.get(log.task_id.as_str()),
            out.streaks.get_mut(&log.task_id),
        ) else {
            skipped += 1;
            continue;
        };

        match log.status {
            LogStatus::Completed => {
                streak.current_streak += 1;
                streak.total_completed += 1;
                streak.longest_streak = streak.longest_streak.max(streak.current_streak);

                let reward = milestone_reward(streak.current_streak);
                if reward > 0 {
                    out.transactions.push(RestTransaction::earned(
                        task,
                        log.date,
                        streak.current_streak,
                        reward,
                    ));
                    out.balance = out.balance.saturating_add_unsigned(reward);
                }
            }
            LogStatus::RestUsed => {
                streak.total_rest_used += 1;
                let cost = rest_cost(task.multiplier);
                out.transactions.push(RestTransaction::spent(task, log.date, cost));
                out.balance = out.balance.saturating_sub_unsigned(cost);
            }
            LogStatus::Missed => {
                streak.total_missed += 1;
                streak.current_streak = 0;
            }
            LogStatus::Pending => {}
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "replay skipped logs referencing unknown tasks");
    }
    tracing::trace!(
        tasks = tasks.len(),
        logs = logs.len(),
        transactions = out.transactions.len(),
        balance = out.balance,
        "replay finished"
    );

    out
}
