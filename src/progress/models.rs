use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mastery level for one subject; at most one row per (student, subject)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStat {
    pub subject: String,
    pub mastery_percent: f32,
    pub last_updated: DateTime<Utc>,
}

/// Consecutive-day study streak; at most one per student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStreak {
    pub current_streak: u32,
    pub last_study_date: DateTime<Utc>,
}

impl Default for StudyStreak {
    /// Zero-value record for students with no recorded activity
    fn default() -> Self {
        Self {
            current_streak: 0,
            last_study_date: DateTime::UNIX_EPOCH,
        }
    }
}
