//! Data models for student profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the assistant addresses this student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityMode {
    StrictTeacher,
    Friendly,
    ProCoder,
}

/// One profile per student; `created_at` never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    pub personality_mode: PersonalityMode,
    pub preferred_language: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        display_name: String,
        personality_mode: PersonalityMode,
        preferred_language: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            display_name,
            personality_mode,
            preferred_language,
            created_at,
        }
    }
}
