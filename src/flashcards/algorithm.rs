//! Review scheduling recurrence
//!
//! Computes the next interval and ease factor for a flashcard from a
//! qualitative rating. The recurrence is a simplified relative of SM-2:
//!
//! - `again`: interval resets to 1 day, ease drops by 0.2
//! - `hard`: interval grows by 20% (at least 1 day), ease drops by 0.15
//! - `good`: interval multiplies by the ease factor, ease unchanged
//! - `easy`: interval multiplies by ease * 1.3, ease gains 0.15
//!
//! Intervals are floored to whole days. The ease factor never falls below
//! 1.3 and has no ceiling; the interval has no ceiling.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f32 = 1.3;

/// Qualitative rating of a review attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewRating {
    Again,
    Hard,
    Good,
    Easy,
}

impl std::str::FromStr for ReviewRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            other => Err(format!(
                "unknown rating {:?} (expected again, hard, good, or easy)",
                other
            )),
        }
    }
}

/// Result of calculating the next review
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub interval_days: i32,
    pub ease_factor: f32,
    pub next_review: DateTime<Utc>,
}

/// Calculate the next interval, ease factor, and due time for a card
///
/// `interval_days` and `ease_factor` are the card's current values; `now`
/// is the review instant supplied by the caller's clock.
pub fn next_review(
    interval_days: i32,
    ease_factor: f32,
    rating: ReviewRating,
    now: DateTime<Utc>,
) -> ReviewOutcome {
    let (interval, ease) = match rating {
        ReviewRating::Again => (1, (ease_factor - 0.2).max(MIN_EASE_FACTOR)),
        ReviewRating::Hard => (
            ((interval_days as f64 * 1.2).floor() as i32).max(1),
            (ease_factor - 0.15).max(MIN_EASE_FACTOR),
        ),
        ReviewRating::Good => (
            (interval_days as f64 * ease_factor as f64).floor() as i32,
            ease_factor,
        ),
        ReviewRating::Easy => (
            (interval_days as f64 * ease_factor as f64 * 1.3).floor() as i32,
            ease_factor + 0.15,
        ),
    };

    ReviewOutcome {
        interval_days: interval,
        ease_factor: ease,
        next_review: now + Duration::days(interval as i64),
    }
}

/// Calculate the would-be interval for each rating
/// Used to show users what interval each rating would give
pub fn preview_intervals(interval_days: i32, ease_factor: f32, now: DateTime<Utc>) -> [i32; 4] {
    [
        next_review(interval_days, ease_factor, ReviewRating::Again, now).interval_days,
        next_review(interval_days, ease_factor, ReviewRating::Hard, now).interval_days,
        next_review(interval_days, ease_factor, ReviewRating::Good, now).interval_days,
        next_review(interval_days, ease_factor, ReviewRating::Easy, now).interval_days,
    ]
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_good_multiplies_by_ease() {
        let result = next_review(2, 2.0, ReviewRating::Good, noon());

        // floor(2 * 2.0) = 4, ease unchanged
        assert_eq!(result.interval_days, 4);
        assert_eq!(result.ease_factor, 2.0);
        assert_eq!(result.next_review, noon() + chrono::Duration::days(4));
    }

    #[test]
    fn test_easy_boosts_interval_and_ease() {
        let result = next_review(2, 2.0, ReviewRating::Easy, noon());

        // floor(2 * 2.0 * 1.3) = floor(5.2) = 5
        assert_eq!(result.interval_days, 5);
        assert_eq!(result.ease_factor, 2.15);
    }

    #[test]
    fn test_again_resets_to_one_day() {
        let result = next_review(30, 2.5, ReviewRating::Again, noon());

        assert_eq!(result.interval_days, 1);
        assert_eq!(result.ease_factor, 2.3);
        assert_eq!(result.next_review, noon() + chrono::Duration::days(1));
    }

    #[test]
    fn test_hard_grows_slowly_with_floor_of_one() {
        let result = next_review(0, 2.5, ReviewRating::Hard, noon());
        assert_eq!(result.interval_days, 1);

        let result = next_review(10, 2.5, ReviewRating::Hard, noon());
        // floor(10 * 1.2) = 12
        assert_eq!(result.interval_days, 12);
    }

    #[test]
    fn test_ease_factor_never_drops_below_floor() {
        let mut ease = 2.5;
        let mut interval = 10;

        for _ in 0..30 {
            let result = next_review(interval, ease, ReviewRating::Again, noon());
            ease = result.ease_factor;
            interval = result.interval_days;
            assert!(ease >= MIN_EASE_FACTOR);
        }
        assert_eq!(ease, MIN_EASE_FACTOR);

        for _ in 0..30 {
            let result = next_review(interval, ease, ReviewRating::Hard, noon());
            ease = result.ease_factor;
            interval = result.interval_days;
            assert!(ease >= MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn test_ease_has_no_ceiling() {
        let mut ease = 2.5;
        for _ in 0..100 {
            ease = next_review(1, ease, ReviewRating::Easy, noon()).ease_factor;
        }
        assert!(ease > 17.0);
    }

    #[test]
    fn test_preview_matches_individual_ratings() {
        let previews = preview_intervals(2, 2.0, noon());
        assert_eq!(previews, [1, 2, 4, 5]);
    }
}
