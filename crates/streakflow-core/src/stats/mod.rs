//! Statistics module for StreakFlow
//!
//! Dashboard analytics derived from the engine output: KPI summary,
//! category breakdown, completion trend, rest point history and the streak
//! leaderboard.

mod dashboard;

pub use dashboard::{
    CategoryCount, CompletionDay, Dashboard, DashboardAnalyzer, DashboardSummary,
    LeaderboardEntry, RpDay,
};
