//! Dashboard analytics.
//!
//! Everything here is a pure projection of (tasks, logs, engine output) for a
//! given `today`; nothing is stored.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::engine::{EngineOutput, TransactionType};
use crate::habit::{DailyLog, LogStatus, Task, TaskCategory};
use crate::storage::{DashboardConfig, MAX_WINDOW_DAYS};

/// Headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Current balance (may be negative).
    pub total_rp: i64,
    pub earned_rp: u64,
    pub spent_rp: u64,
    /// Completions weighted by task multiplier.
    pub productivity_score: u64,
    /// Percentage (0-100) of logs that are completions; 0 with no logs.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: TaskCategory,
    pub completed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionDay {
    pub date: NaiveDate,
    pub completed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpDay {
    pub date: NaiveDate,
    pub earned: u64,
    pub spent: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub task_id: String,
    pub name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Full dashboard report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub summary: DashboardSummary,
    pub categories: Vec<CategoryCount>,
    pub completion_trend: Vec<CompletionDay>,
    pub rp_history: Vec<RpDay>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Builds [`Dashboard`] reports.
pub struct DashboardAnalyzer {
    config: DashboardConfig,
}

impl Default for DashboardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardAnalyzer {
    pub fn new() -> Self {
        Self {
            config: DashboardConfig::default(),
        }
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn analyze(
        &self,
        tasks: &[Task],
        logs: &[DailyLog],
        output: &EngineOutput,
        today: NaiveDate,
    ) -> Dashboard {
        Dashboard {
            today,
            summary: Self::summary(tasks, logs, output),
            categories: Self::categories(tasks, output),
            completion_trend: Self::completion_trend(logs, today, self.config.trend_days),
            rp_history: Self::rp_history(output, today, self.config.rp_history_days),
            leaderboard: Self::leaderboard(tasks, output, self.config.leaderboard_size),
        }
    }

    pub fn summary(tasks: &[Task], logs: &[DailyLog], output: &EngineOutput) -> DashboardSummary {
        let productivity_score = tasks
            .iter()
            .filter_map(|t| {
                output
                    .streak(&t.id)
                    .map(|s| u64::from(s.total_completed) * u64::from(t.multiplier))
            })
            .sum();

        let completed = logs.iter().filter(|l| l.status == LogStatus::Completed).count();
        let completion_rate = if logs.is_empty() {
            0.0
        } else {
            completed as f64 / logs.len() as f64 * 100.0
        };

        DashboardSummary {
            total_rp: output.balance,
            earned_rp: output.earned_total(),
            spent_rp: output.spent_total(),
            productivity_score,
            completion_rate,
        }
    }

    /// Completions per category, for categories that have at least one task.
    pub fn categories(tasks: &[Task], output: &EngineOutput) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<TaskCategory, u32> = BTreeMap::new();
        for task in tasks {
            if let Some(streak) = output.streak(&task.id) {
                *counts.entry(task.category).or_default() += streak.total_completed;
            }
        }
        counts
            .into_iter()
            .map(|(category, completed)| CategoryCount { category, completed })
            .collect()
    }

    /// Completed logs per day over the `days` days ending at `today`.
    pub fn completion_trend(logs: &[DailyLog], today: NaiveDate, days: u32) -> Vec<CompletionDay> {
        let mut per_day: HashMap<NaiveDate, u32> = HashMap::new();
        for log in logs.iter().filter(|l| l.status == LogStatus::Completed) {
            *per_day.entry(log.date).or_default() += 1;
        }
        window(today, days)
            .map(|date| CompletionDay {
                date,
                completed: per_day.get(&date).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Earned and spent RP per day over the `days` days ending at `today`.
    pub fn rp_history(output: &EngineOutput, today: NaiveDate, days: u32) -> Vec<RpDay> {
        let mut per_day: HashMap<NaiveDate, (u64, u64)> = HashMap::new();
        for t in &output.transactions {
            let entry = per_day.entry(t.date).or_default();
            match t.kind {
                TransactionType::Earned => entry.0 = entry.0.saturating_add(t.amount),
                TransactionType::Spent => entry.1 = entry.1.saturating_add(t.amount),
            }
        }
        window(today, days)
            .map(|date| {
                let (earned, spent) = per_day.get(&date).copied().unwrap_or((0, 0));
                RpDay { date, earned, spent }
            })
            .collect()
    }

    /// Top `size` tasks by current streak, then longest streak, then name.
    pub fn leaderboard(tasks: &[Task], output: &EngineOutput, size: usize) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = tasks
            .iter()
            .filter_map(|t| {
                output.streak(&t.id).map(|s| LeaderboardEntry {
                    task_id: t.id.clone(),
                    name: t.name.clone(),
                    current_streak: s.current_streak,
                    longest_streak: s.longest_streak,
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            b.current_streak
                .cmp(&a.current_streak)
                .then(b.longest_streak.cmp(&a.longest_streak))
                .then_with(|| a.name.cmp(&b.name))
        });
        entries.truncate(size);
        entries
    }
}

/// Dates from `today - (days - 1)` up to `today`, oldest first.
///
/// `days` is capped at `MAX_WINDOW_DAYS`; dates before the calendar's start
/// are dropped.
fn window(today: NaiveDate, days: u32) -> impl Iterator<Item = NaiveDate> {
    (0..i64::from(days.min(MAX_WINDOW_DAYS)))
        .rev()
        .filter_map(move |offset| today.checked_sub_signed(Duration::days(offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::replay;
    use crate::habit::TaskStatus;
    use chrono::Utc;

    fn task(id: &str, category: TaskCategory, multiplier: u32) -> Task {
        Task {
            id: id.to_string(),
            name: id.to_uppercase(),
            category,
            active_days: (0..7).collect(),
            multiplier,
            status: TaskStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn d(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, n).unwrap()
    }

    #[test]
    fn summary_weights_completions_by_multiplier() {
        let tasks = vec![task("a", TaskCategory::Gym, 3), task("b", TaskCategory::Study, 1)];
        let logs = vec![
            DailyLog::new("a", d(1), LogStatus::Completed),
            DailyLog::new("a", d(2), LogStatus::Completed),
            DailyLog::new("b", d(1), LogStatus::Completed),
            DailyLog::new("b", d(2), LogStatus::Missed),
        ];
        let out = replay(&tasks, &logs);
        let summary = DashboardAnalyzer::summary(&tasks, &logs, &out);
        assert_eq!(summary.productivity_score, 7);
        assert!((summary.completion_rate - 75.0).abs() < f64::EPSILON);
        assert_eq!(summary.total_rp, 0);
    }

    #[test]
    fn empty_logs_give_zero_rate() {
        let out = replay(&[], &[]);
        let summary = DashboardAnalyzer::summary(&[], &[], &out);
        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.productivity_score, 0);
    }

    #[test]
    fn categories_only_include_present_ones() {
        let tasks = vec![
            task("a", TaskCategory::Gym, 1),
            task("b", TaskCategory::Gym, 1),
            task("c", TaskCategory::Business, 1),
        ];
        let logs = vec![
            DailyLog::new("a", d(1), LogStatus::Completed),
            DailyLog::new("b", d(1), LogStatus::Completed),
        ];
        let out = replay(&tasks, &logs);
        let cats = DashboardAnalyzer::categories(&tasks, &out);
        assert_eq!(
            cats,
            vec![
                CategoryCount { category: TaskCategory::Gym, completed: 2 },
                CategoryCount { category: TaskCategory::Business, completed: 0 },
            ]
        );
    }

    #[test]
    fn trend_covers_window_ending_today() {
        let logs = vec![
            DailyLog::new("a", d(1), LogStatus::Completed),
            DailyLog::new("a", d(5), LogStatus::Completed),
            DailyLog::new("b", d(5), LogStatus::Completed),
            DailyLog::new("c", d(5), LogStatus::Missed),
        ];
        let trend = DashboardAnalyzer::completion_trend(&logs, d(7), 7);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, d(1));
        assert_eq!(trend[6].date, d(7));
        assert_eq!(trend[0].completed, 1);
        assert_eq!(trend[4].completed, 2);
        assert_eq!(DashboardAnalyzer::completion_trend(&logs, d(7), 0).len(), 0);
    }

    #[test]
    fn oversized_windows_are_capped() {
        let config = DashboardConfig {
            trend_days: 200_000_000,
            rp_history_days: u32::MAX,
            ..DashboardConfig::default()
        };
        let dash = DashboardAnalyzer::with_config(config).analyze(&[], &[], &replay(&[], &[]), d(7));
        assert_eq!(dash.completion_trend.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(dash.rp_history.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(dash.completion_trend.last().map(|c| c.date), Some(d(7)));

        let trend = DashboardAnalyzer::completion_trend(&[], NaiveDate::MIN, 3);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].date, NaiveDate::MIN);
    }

    #[test]
    fn rp_history_splits_earned_and_spent() {
        let tasks = vec![task("a", TaskCategory::Gym, 1)];
        let mut logs: Vec<_> = (1..=15)
            .map(|n| DailyLog::new("a", d(n), LogStatus::Completed))
            .collect();
        logs.push(DailyLog::new("a", d(16), LogStatus::RestUsed));
        let out = replay(&tasks, &logs);

        let history = DashboardAnalyzer::rp_history(&out, d(16), 3);
        assert_eq!(
            history,
            vec![
                RpDay { date: d(14), earned: 0, spent: 0 },
                RpDay { date: d(15), earned: 3, spent: 0 },
                RpDay { date: d(16), earned: 0, spent: 10 },
            ]
        );
    }

    #[test]
    fn leaderboard_orders_and_truncates() {
        let tasks = vec![
            task("a", TaskCategory::Gym, 1),
            task("b", TaskCategory::Gym, 1),
            task("c", TaskCategory::Gym, 1),
        ];
        let logs = vec![
            DailyLog::new("a", d(1), LogStatus::Completed),
            DailyLog::new("b", d(1), LogStatus::Completed),
            DailyLog::new("b", d(2), LogStatus::Completed),
            DailyLog::new("c", d(1), LogStatus::Completed),
            DailyLog::new("c", d(2), LogStatus::Completed),
            DailyLog::new("c", d(3), LogStatus::Missed),
            DailyLog::new("c", d(4), LogStatus::Completed),
        ];
        let out = replay(&tasks, &logs);
        let board = DashboardAnalyzer::leaderboard(&tasks, &out, 2);
        let names: Vec<_> = board.iter().map(|e| e.name.as_str()).collect();
        // b: 2, then a and c tie on current 1, c wins on longest 2
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn analyze_uses_configured_windows() {
        let analyzer = DashboardAnalyzer::with_config(DashboardConfig {
            trend_days: 3,
            rp_history_days: 5,
            leaderboard_size: 1,
        });
        let tasks = vec![task("a", TaskCategory::Gym, 1), task("b", TaskCategory::Other, 1)];
        let out = replay(&tasks, &[]);
        let report = analyzer.analyze(&tasks, &[], &out, d(10));
        assert_eq!(report.completion_trend.len(), 3);
        assert_eq!(report.rp_history.len(), 5);
        assert_eq!(report.leaderboard.len(), 1);
        assert_eq!(report.today, d(10));
    }
}
