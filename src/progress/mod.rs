//! Mastery tracking and study streaks

pub mod models;
pub mod storage;
pub mod streak;

pub use models::{ProgressStat, StudyStreak};
pub use storage::ProgressStorage;
