//! Streak replay engine and rest point economy.
//!
//! All derived state (streaks, ledger, balance) is a pure function of the raw
//! tasks and logs. [`replay`] rebuilds it from scratch on every call; there is
//! no incremental path.
//!
//! The toggle cycle lives in [`resolver`]. It needs the balance of the
//! previous replay to decide whether a rest is affordable, so callers must
//! replay again after every single log mutation.

pub mod replay;
pub mod resolver;
pub mod rewards;

pub use replay::{replay, EngineOutput, RestTransaction, StreakInfo, TransactionType};
pub use resolver::{next_status, LogChange, Transition};
pub use rewards::{milestone_reward, rest_cost};
