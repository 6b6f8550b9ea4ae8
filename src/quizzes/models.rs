use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::EntityId;

/// One quiz outcome, immutable once recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: EntityId,
    pub subject: String,
    pub score: u32,
    pub total_questions: u32,
    pub timestamp: DateTime<Utc>,
}
