//! Storage operations for flashcard decks
//!
//! Deck lookups are strict (missing deck is an error); a review against a
//! card id with no match leaves the deck unchanged, mirroring the lenient
//! note mutations.

use std::sync::Arc;

use super::algorithm::{self, ReviewRating, MIN_EASE_FACTOR};
use super::models::*;
use crate::storage::{EntityId, Result, StoreCore, StoreError, StudentId};

pub struct FlashcardStorage {
    core: Arc<StoreCore>,
}

impl FlashcardStorage {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self { core }
    }

    // ==================== Deck Operations ====================

    /// Create a new deck with an empty card list
    pub fn create_deck(&self, student: &StudentId, name: String, subject: String) -> FlashcardDeck {
        let id = self.core.mint_id();
        let deck = FlashcardDeck::new(id.clone(), name, subject);
        self.core.with_student(student, |data| {
            data.decks.insert(id, deck.clone());
        });
        deck
    }

    /// List all decks, cards included
    pub fn list_decks(&self, student: &StudentId) -> Vec<FlashcardDeck> {
        let mut decks = self
            .core
            .read_student(student, |data| {
                data.decks.values().cloned().collect::<Vec<_>>()
            })
            .unwrap_or_default();
        decks.sort_by(|a, b| a.id.cmp(&b.id));
        decks
    }

    /// Ordered cards of one deck
    pub fn get_deck_cards(&self, student: &StudentId, deck_id: &EntityId) -> Result<Vec<Flashcard>> {
        self.core
            .read_student(student, |data| {
                data.decks.get(deck_id).map(|d| d.cards.clone())
            })
            .flatten()
            .ok_or_else(|| StoreError::DeckNotFound(deck_id.clone()))
    }

    // ==================== Card Operations ====================

    /// Append a new card, due immediately
    pub fn add_card(
        &self,
        student: &StudentId,
        deck_id: &EntityId,
        front: String,
        back: String,
    ) -> Result<Flashcard> {
        let now = self.core.now();
        let id = self.core.mint_id();
        self.core
            .mutate_student(student, |data| {
                let deck = data
                    .decks
                    .get_mut(deck_id)
                    .ok_or_else(|| StoreError::DeckNotFound(deck_id.clone()))?;
                let card = Flashcard::new(id, front, back, now);
                deck.cards.push(card.clone());
                Ok(card)
            })
            .unwrap_or_else(|| Err(StoreError::DeckNotFound(deck_id.clone())))
    }

    // ==================== Review Operations ====================

    /// Store caller-computed review values (legacy path).
    ///
    /// Kept for hosts that schedule reviews client-side. The supplied values
    /// are clamped to the data-model floors, and `next_review` is recomputed
    /// here as now + interval. Prefer [`submit_review`], which derives both
    /// values from the rating instead of trusting the caller.
    ///
    /// [`submit_review`]: Self::submit_review
    pub fn update_card_review(
        &self,
        student: &StudentId,
        deck_id: &EntityId,
        card_id: &EntityId,
        interval_days: i32,
        ease_factor: f32,
    ) -> Result<()> {
        let now = self.core.now();
        self.core
            .mutate_student(student, |data| {
                let deck = data
                    .decks
                    .get_mut(deck_id)
                    .ok_or_else(|| StoreError::DeckNotFound(deck_id.clone()))?;
                if let Some(card) = deck.cards.iter_mut().find(|c| &c.id == card_id) {
                    let interval = interval_days.max(0);
                    card.interval_days = interval;
                    card.ease_factor = ease_factor.max(MIN_EASE_FACTOR);
                    card.next_review = now + chrono::Duration::days(interval as i64);
                }
                // Unknown card id: deck left unchanged
                Ok(())
            })
            .unwrap_or_else(|| Err(StoreError::DeckNotFound(deck_id.clone())))
    }

    /// Rate a card and apply the scheduling recurrence.
    ///
    /// Returns the updated card, or `None` when the card id has no match in
    /// the deck.
    pub fn submit_review(
        &self,
        student: &StudentId,
        deck_id: &EntityId,
        card_id: &EntityId,
        rating: ReviewRating,
    ) -> Result<Option<Flashcard>> {
        let now = self.core.now();
        self.core
            .mutate_student(student, |data| {
                let deck = data
                    .decks
                    .get_mut(deck_id)
                    .ok_or_else(|| StoreError::DeckNotFound(deck_id.clone()))?;
                let Some(card) = deck.cards.iter_mut().find(|c| &c.id == card_id) else {
                    return Ok(None);
                };

                let outcome =
                    algorithm::next_review(card.interval_days, card.ease_factor, rating, now);
                card.interval_days = outcome.interval_days;
                card.ease_factor = outcome.ease_factor;
                card.next_review = outcome.next_review;

                Ok(Some(card.clone()))
            })
            .unwrap_or_else(|| Err(StoreError::DeckNotFound(deck_id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::clock::test_clock::ManualClock;
    use crate::clock::Clock;
    use crate::StudyStore;

    fn test_store() -> (Arc<ManualClock>, StudyStore) {
        let clock = Arc::new(ManualClock::new());
        let store = StudyStore::with_clock(clock.clone());
        (clock, store)
    }

    #[test]
    fn test_new_card_defaults() {
        let (clock, store) = test_store();
        let student = StudentId::new("s1");

        let deck = store
            .flashcards
            .create_deck(&student, "Bio".to_string(), "Biology".to_string());
        let card = store
            .flashcards
            .add_card(&student, &deck.id, "Q".to_string(), "A".to_string())
            .unwrap();

        assert_eq!(card.interval_days, 0);
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.difficulty, 1);
        assert_eq!(card.next_review, clock.now());
    }

    #[test]
    fn test_review_update_reschedules_card() {
        let (clock, store) = test_store();
        let student = StudentId::new("s1");

        let deck = store
            .flashcards
            .create_deck(&student, "Bio".to_string(), "Biology".to_string());
        let card = store
            .flashcards
            .add_card(&student, &deck.id, "Q".to_string(), "A".to_string())
            .unwrap();

        store
            .flashcards
            .update_card_review(&student, &deck.id, &card.id, 1, 2.5)
            .unwrap();

        let cards = store.flashcards.get_deck_cards(&student, &deck.id).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].interval_days, 1);
        assert_eq!(cards[0].ease_factor, 2.5);
        assert_eq!(cards[0].next_review, clock.now() + Duration::days(1));
    }

    #[test]
    fn test_review_clamps_hostile_values() {
        let (_clock, store) = test_store();
        let student = StudentId::new("s1");

        let deck = store
            .flashcards
            .create_deck(&student, "Bio".to_string(), "Biology".to_string());
        let card = store
            .flashcards
            .add_card(&student, &deck.id, "Q".to_string(), "A".to_string())
            .unwrap();

        store
            .flashcards
            .update_card_review(&student, &deck.id, &card.id, -50, 0.1)
            .unwrap();

        let cards = store.flashcards.get_deck_cards(&student, &deck.id).unwrap();
        assert_eq!(cards[0].interval_days, 0);
        assert_eq!(cards[0].ease_factor, 1.3);
    }

    #[test]
    fn test_review_unknown_card_leaves_deck_unchanged() {
        let (_clock, store) = test_store();
        let student = StudentId::new("s1");

        let deck = store
            .flashcards
            .create_deck(&student, "Bio".to_string(), "Biology".to_string());
        let card = store
            .flashcards
            .add_card(&student, &deck.id, "Q".to_string(), "A".to_string())
            .unwrap();

        store
            .flashcards
            .update_card_review(&student, &deck.id, &EntityId::from("ghost"), 7, 2.0)
            .unwrap();

        let outcome = store
            .flashcards
            .submit_review(&student, &deck.id, &EntityId::from("ghost"), ReviewRating::Good)
            .unwrap();
        assert!(outcome.is_none());

        let cards = store.flashcards.get_deck_cards(&student, &deck.id).unwrap();
        assert_eq!(cards[0].interval_days, card.interval_days);
        assert_eq!(cards[0].ease_factor, card.ease_factor);
    }

    #[test]
    fn test_review_unknown_deck_fails() {
        let (_clock, store) = test_store();
        let student = StudentId::new("s1");
        let ghost = EntityId::from("ghost");

        let err = store
            .flashcards
            .add_card(&student, &ghost, "Q".to_string(), "A".to_string())
            .unwrap_err();
        assert!(matches!(err, StoreError::DeckNotFound(_)));

        let err = store
            .flashcards
            .update_card_review(&student, &ghost, &ghost, 1, 2.5)
            .unwrap_err();
        assert!(matches!(err, StoreError::DeckNotFound(_)));

        let err = store.flashcards.get_deck_cards(&student, &ghost).unwrap_err();
        assert!(matches!(err, StoreError::DeckNotFound(_)));
    }

    #[test]
    fn test_submit_review_runs_the_recurrence() {
        let (clock, store) = test_store();
        let student = StudentId::new("s1");

        let deck = store
            .flashcards
            .create_deck(&student, "Bio".to_string(), "Biology".to_string());
        let card = store
            .flashcards
            .add_card(&student, &deck.id, "Q".to_string(), "A".to_string())
            .unwrap();

        // Fresh card rated again: 1 day out, ease 2.5 - 0.2
        let reviewed = store
            .flashcards
            .submit_review(&student, &deck.id, &card.id, ReviewRating::Again)
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.interval_days, 1);
        assert_eq!(reviewed.ease_factor, 2.3);
        assert_eq!(reviewed.next_review, clock.now() + Duration::days(1));

        // Next day, rated good: floor(1 * 2.3) = 2 days
        clock.advance_days(1);
        let reviewed = store
            .flashcards
            .submit_review(&student, &deck.id, &card.id, ReviewRating::Good)
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.interval_days, 2);
        assert_eq!(reviewed.ease_factor, 2.3);
    }

    #[test]
    fn test_other_cards_untouched_by_review() {
        let (_clock, store) = test_store();
        let student = StudentId::new("s1");

        let deck = store
            .flashcards
            .create_deck(&student, "Bio".to_string(), "Biology".to_string());
        let first = store
            .flashcards
            .add_card(&student, &deck.id, "Q1".to_string(), "A1".to_string())
            .unwrap();
        let second = store
            .flashcards
            .add_card(&student, &deck.id, "Q2".to_string(), "A2".to_string())
            .unwrap();

        store
            .flashcards
            .update_card_review(&student, &deck.id, &first.id, 3, 2.0)
            .unwrap();

        let cards = store.flashcards.get_deck_cards(&student, &deck.id).unwrap();
        let untouched = cards.iter().find(|c| c.id == second.id).unwrap();
        assert_eq!(untouched.interval_days, 0);
        assert_eq!(untouched.ease_factor, 2.5);
    }
}
