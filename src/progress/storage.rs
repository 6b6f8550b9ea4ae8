use std::sync::Arc;

use super::models::{ProgressStat, StudyStreak};
use super::streak::advance_streak;
use crate::storage::{StoreCore, StudentId};

/// Storage for per-subject mastery stats and the study streak
pub struct ProgressStorage {
    core: Arc<StoreCore>,
}

impl ProgressStorage {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self { core }
    }

    /// Upsert the single stat row for (student, subject)
    pub fn update_stat(
        &self,
        student: &StudentId,
        subject: String,
        mastery_percent: f32,
    ) -> ProgressStat {
        let now = self.core.now();
        let stat = ProgressStat {
            subject: subject.clone(),
            mastery_percent,
            last_updated: now,
        };
        self.core.with_student(student, |data| {
            data.progress.insert(subject, stat.clone());
        });
        stat
    }

    /// All stat rows, one per subject
    pub fn list_stats(&self, student: &StudentId) -> Vec<ProgressStat> {
        self.core
            .read_student(student, |data| {
                data.progress.values().cloned().collect::<Vec<_>>()
            })
            .unwrap_or_default()
    }

    /// Record a study activity and apply the streak rules
    pub fn record_activity(&self, student: &StudentId) -> StudyStreak {
        let now = self.core.now();
        self.core.with_student(student, |data| {
            let next = advance_streak(data.streak.as_ref(), now);
            data.streak = Some(next.clone());
            next
        })
    }

    /// The streak record, or the zero-value default when none exists
    pub fn get_streak(&self, student: &StudentId) -> StudyStreak {
        self.core
            .read_student(student, |data| data.streak.clone())
            .flatten()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};

    use super::*;
    use crate::clock::test_clock::ManualClock;
    use crate::clock::Clock;
    use crate::StudyStore;

    #[test]
    fn test_stat_row_is_replaced_per_subject() {
        let clock = Arc::new(ManualClock::new());
        let store = StudyStore::with_clock(clock.clone());
        let student = StudentId::new("s1");

        store
            .progress
            .update_stat(&student, "algebra".to_string(), 40.0);
        clock.advance(Duration::hours(1));
        let updated = store
            .progress
            .update_stat(&student, "algebra".to_string(), 55.0);
        store
            .progress
            .update_stat(&student, "chemistry".to_string(), 20.0);

        let stats = store.progress.list_stats(&student);
        assert_eq!(stats.len(), 2);

        let algebra = stats.iter().find(|s| s.subject == "algebra").unwrap();
        assert_eq!(algebra.mastery_percent, 55.0);
        assert_eq!(algebra.last_updated, updated.last_updated);
    }

    #[test]
    fn test_streak_defaults_to_zero_record() {
        let store = StudyStore::with_clock(Arc::new(ManualClock::new()));
        let student = StudentId::new("s1");

        let streak = store.progress.get_streak(&student);
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.last_study_date, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_activity_grows_and_resets_streak() {
        let clock = Arc::new(ManualClock::new());
        let store = StudyStore::with_clock(clock.clone());
        let student = StudentId::new("s1");

        assert_eq!(store.progress.record_activity(&student).current_streak, 1);

        clock.advance_days(1);
        assert_eq!(store.progress.record_activity(&student).current_streak, 2);

        clock.advance_days(1);
        assert_eq!(store.progress.record_activity(&student).current_streak, 3);

        // Same day again: reset, not increment
        clock.advance(Duration::minutes(30));
        assert_eq!(store.progress.record_activity(&student).current_streak, 1);

        let stored = store.progress.get_streak(&student);
        assert_eq!(stored.current_streak, 1);
        assert_eq!(stored.last_study_date, clock.now());
    }
}
