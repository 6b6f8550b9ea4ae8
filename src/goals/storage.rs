//! Goals storage implementation

use std::sync::Arc;

use chrono::NaiveDate;

use super::models::Goal;
use crate::storage::{EntityId, Result, StoreCore, StoreError, StudentId};

pub struct GoalStorage {
    core: Arc<StoreCore>,
}

impl GoalStorage {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self { core }
    }

    pub fn create_goal(
        &self,
        student: &StudentId,
        title: String,
        description: String,
        target_date: NaiveDate,
    ) -> Goal {
        let now = self.core.now();
        let id = self.core.mint_id();
        let goal = Goal::new(id.clone(), title, description, target_date, now);
        self.core.with_student(student, |data| {
            data.goals.insert(id, goal.clone());
        });
        goal
    }

    /// Mark a goal completed. Completing an already-completed goal is a
    /// no-op success; completion is never reversed.
    pub fn complete_goal(&self, student: &StudentId, goal_id: &EntityId) -> Result<Goal> {
        self.core
            .mutate_student(student, |data| {
                let goal = data
                    .goals
                    .get_mut(goal_id)
                    .ok_or_else(|| StoreError::GoalNotFound(goal_id.clone()))?;
                goal.is_completed = true;
                Ok(goal.clone())
            })
            .unwrap_or_else(|| Err(StoreError::GoalNotFound(goal_id.clone())))
    }

    pub fn list_goals(&self, student: &StudentId) -> Vec<Goal> {
        let mut goals = self
            .core
            .read_student(student, |data| {
                data.goals.values().cloned().collect::<Vec<_>>()
            })
            .unwrap_or_default();
        goals.sort_by(|a, b| a.id.cmp(&b.id));
        goals
    }
}
