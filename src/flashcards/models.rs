//! Data models for the flashcard system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::EntityId;

/// A deck is an ordered collection of flashcards on one subject
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardDeck {
    pub id: EntityId,
    pub name: String,
    pub subject: String,
    pub cards: Vec<Flashcard>,
}

impl FlashcardDeck {
    pub fn new(id: EntityId, name: String, subject: String) -> Self {
        Self {
            id,
            name,
            subject,
            cards: Vec::new(),
        }
    }
}

/// A flashcard with question (front) and answer (back) plus its review state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: EntityId,
    pub front: String,
    pub back: String,
    /// Difficulty rank, 1 = easiest
    pub difficulty: i32,
    /// When the card is next due for review
    pub next_review: DateTime<Utc>,
    /// Current interval in days, never negative
    pub interval_days: i32,
    /// Growth multiplier for the interval, floored at 1.3
    pub ease_factor: f32,
}

impl Flashcard {
    /// New cards are due immediately with the default ease factor
    pub fn new(id: EntityId, front: String, back: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            front,
            back,
            difficulty: 1,
            next_review: now,
            interval_days: 0,
            ease_factor: 2.5,
        }
    }
}
