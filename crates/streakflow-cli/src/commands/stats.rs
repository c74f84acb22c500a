use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use streakflow_core::{Config, DashboardAnalyzer};

use super::{date_or_today, open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Streak statistics per habit
    Streaks,
    /// Rest point ledger in chronological order
    Ledger {
        /// Only transactions of this task
        #[arg(long)]
        task: Option<String>,
    },
    /// Current rest point balance
    Balance,
    /// Dashboard report
    Dashboard {
        /// Reference day for trend windows, defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
struct BalanceOutput {
    balance: i64,
    earned: u64,
    spent: u64,
}

pub fn run(action: StatsAction, config: &Config) -> CmdResult {
    let (_db, tracker) = open_tracker()?;

    match action {
        StatsAction::Streaks => {
            print_json(&tracker.snapshot().streaks)?;
        }
        StatsAction::Ledger { task } => {
            let snapshot = tracker.snapshot();
            let ledger: Vec<_> = snapshot
                .transactions
                .iter()
                .filter(|t| task.as_deref().map_or(true, |id| t.task_id == id))
                .collect();
            print_json(&ledger)?;
        }
        StatsAction::Balance => {
            let snapshot = tracker.snapshot();
            print_json(&BalanceOutput {
                balance: snapshot.balance,
                earned: snapshot.earned_total(),
                spent: snapshot.spent_total(),
            })?;
        }
        StatsAction::Dashboard { today } => {
            let analyzer = DashboardAnalyzer::with_config(config.dashboard.clone());
            print_json(&tracker.dashboard(&analyzer, date_or_today(today)))?;
        }
    }
    Ok(())
}
