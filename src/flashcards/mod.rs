//! Flashcard and spaced repetition system
//!
//! This module provides:
//! - Deck management (per-student flashcard collections)
//! - Card creation and review state
//! - The review scheduling recurrence (interval and ease factor updates)

pub mod algorithm;
pub mod models;
pub mod storage;

pub use algorithm::{ReviewOutcome, ReviewRating};
pub use models::*;
pub use storage::FlashcardStorage;
