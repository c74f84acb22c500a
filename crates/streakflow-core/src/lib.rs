//! # StreakFlow Core Library
//!
//! Core logic for StreakFlow, a habit tracker that turns daily outcomes into
//! streaks and a "rest point" (RP) currency. The CLI is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Engine**: a pure replay of the raw daily logs into per-task streaks,
//!   an RP ledger and a balance. Nothing derived is ever stored.
//! - **Resolver**: the Pending → Completed → Rest/Missed → Pending toggle
//!   cycle, gated on the balance of the previous replay
//! - **Tracker**: single owner of tasks and logs (CRUD, cascading delete,
//!   toggling, day/week views)
//! - **Storage**: SQLite slots for the raw collections and TOML configuration
//! - **Stats**: dashboard analytics over the engine output
//!
//! ## Key Components
//!
//! - [`replay`]: rebuild derived state from (tasks, logs)
//! - [`next_status`]: toggle cycle transition
//! - [`Tracker`]: mutation front-end enforcing replay-after-every-write
//! - [`Database`]: persistence of the `sf_tasks` / `sf_logs` slots
//! - [`Config`]: application configuration management

pub mod engine;
pub mod error;
pub mod habit;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use engine::{
    milestone_reward, next_status, replay, rest_cost, EngineOutput, LogChange, RestTransaction,
    StreakInfo, TransactionType, Transition,
};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{DailyLog, LogStatus, NewTask, Task, TaskCategory, TaskPatch, TaskStatus};
pub use stats::{Dashboard, DashboardAnalyzer};
pub use storage::{Config, Database};
pub use tracker::{DayEntry, Tracker, WeekView};
