//! Milestone rewards and rest costs.
//!
//! Reward schedule, in rest points (RP):
//!
//! | streak | reward |
//! |--------|--------|
//! | 15     | 3      |
//! | 30     | 6      |
//! | 60     | 9      |
//! | 90     | 18     |
//! | 120    | 36     |
//! | 150    | 72     |
//!
//! Past 60 the reward doubles every 30 days. 45, 75 and any other length
//! earn nothing.

/// RP charged per multiplier point for one rest day.
pub const REST_COST_PER_MULTIPLIER: u64 = 10;

/// Reward earned when a streak reaches exactly `streak` days.
///
/// Saturates at `u64::MAX` for streaks long enough to overflow.
pub fn milestone_reward(streak: u32) -> u64 {
    match streak {
        15 => 3,
        30 => 6,
        60 => 9,
        s if s > 60 && s % 30 == 0 => {
            let steps = (s - 60) / 30;
            2u64.checked_pow(steps)
                .and_then(|factor| factor.checked_mul(9))
                .unwrap_or(u64::MAX)
        }
        _ => 0,
    }
}

/// Cost of one rest day for a task with the given multiplier.
pub fn rest_cost(multiplier: u32) -> u64 {
    REST_COST_PER_MULTIPLIER * u64::from(multiplier)
}
