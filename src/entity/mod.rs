//! SeaORM entity definitions
//!
//! One module per table; activity categories, RPG stats and goal periods are
//! string-backed active enums shared across entities.

pub mod activity;
pub mod goal;
pub mod goal_progress;
pub mod user;

pub use activity::{ActivityType, RpgStat};
pub use goal::GoalPeriod;
