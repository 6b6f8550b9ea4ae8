//! Goal data models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::EntityId;

/// A study goal with a target date
///
/// `is_completed` only ever moves false to true.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        id: EntityId,
        title: String,
        description: String,
        target_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            target_date,
            is_completed: false,
            created_at,
        }
    }
}
