use std::sync::Arc;

use super::models::QuizResult;
use crate::storage::{StoreCore, StudentId};

/// Append-only storage for quiz outcomes
pub struct QuizStorage {
    core: Arc<StoreCore>,
}

impl QuizStorage {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self { core }
    }

    pub fn record_result(
        &self,
        student: &StudentId,
        subject: String,
        score: u32,
        total_questions: u32,
    ) -> QuizResult {
        let now = self.core.now();
        let id = self.core.mint_id();
        let result = QuizResult {
            id: id.clone(),
            subject,
            score,
            total_questions,
            timestamp: now,
        };
        self.core.with_student(student, |data| {
            data.quiz_results.insert(id, result.clone());
        });
        result
    }

    /// All results, most recent first; equal timestamps keep insertion order
    pub fn list_results(&self, student: &StudentId) -> Vec<QuizResult> {
        let mut results = self
            .core
            .read_student(student, |data| {
                data.quiz_results.values().cloned().collect::<Vec<_>>()
            })
            .unwrap_or_default();
        results.sort_by(|a, b| a.id.cmp(&b.id));
        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        results
    }
}
