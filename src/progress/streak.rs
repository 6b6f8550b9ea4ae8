//! Streak arithmetic
//!
//! Day boundaries are UTC epoch days: the unix timestamp divided by a single
//! fixed day constant, truncating. No timezone adjustment. A streak grows
//! only when activity lands on the calendar day immediately after the last
//! recorded one; anything else, including a second activity on the same day,
//! restarts the count at 1.

use chrono::{DateTime, Utc};

use super::models::StudyStreak;

const SECS_PER_DAY: i64 = 86_400;

fn epoch_day(t: DateTime<Utc>) -> i64 {
    t.timestamp().div_euclid(SECS_PER_DAY)
}

/// Compute the streak record after an activity at `now`
pub fn advance_streak(previous: Option<&StudyStreak>, now: DateTime<Utc>) -> StudyStreak {
    let current_streak = match previous {
        None => 1,
        Some(prev) if epoch_day(now) - epoch_day(prev.last_study_date) == 1 => {
            prev.current_streak + 1
        }
        Some(_) => 1,
    };

    StudyStreak {
        current_streak,
        last_study_date: now,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_first_activity_starts_at_one() {
        let streak = advance_streak(None, morning());
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.last_study_date, morning());
    }

    #[test]
    fn test_next_day_increments() {
        let day_one = advance_streak(None, morning());
        let mut streak = day_one;
        for day in 1..=3 {
            streak = advance_streak(Some(&streak), morning() + Duration::days(day));
        }
        assert_eq!(streak.current_streak, 4);
    }

    #[test]
    fn test_same_day_resets_to_one() {
        let mut streak = advance_streak(None, morning());
        streak = advance_streak(Some(&streak), morning() + Duration::days(1));
        assert_eq!(streak.current_streak, 2);

        // Second activity later the same day restarts the count
        let same_day = morning() + Duration::days(1) + Duration::hours(9);
        let streak = advance_streak(Some(&streak), same_day);
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.last_study_date, same_day);
    }

    #[test]
    fn test_gap_resets_to_one() {
        let mut streak = advance_streak(None, morning());
        for day in 1..=5 {
            streak = advance_streak(Some(&streak), morning() + Duration::days(day));
        }
        assert_eq!(streak.current_streak, 6);

        let streak = advance_streak(Some(&streak), morning() + Duration::days(8));
        assert_eq!(streak.current_streak, 1);
    }

    #[test]
    fn test_increment_crosses_day_boundary_not_24h() {
        // 23:50 on day D followed by 00:10 on day D+1 still increments,
        // even though less than an hour passed
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 23, 50, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 3, 2, 0, 10, 0).unwrap();

        let streak = advance_streak(None, late);
        let streak = advance_streak(Some(&streak), early);
        assert_eq!(streak.current_streak, 2);
    }
}
