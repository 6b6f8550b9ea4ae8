//! Identity-bound operation surface
//!
//! The hosting environment authenticates the caller and hands the resulting
//! identity to [`StudyStore::session`]; every operation here then acts on
//! that one student's partition. This is the full surface a transport layer
//! needs to expose, one method per remote operation.

use chrono::NaiveDate;

use crate::chat_sessions::{ChatMessage, ChatSessionView, MessageRole};
use crate::flashcards::{Flashcard, FlashcardDeck, ReviewRating};
use crate::goals::Goal;
use crate::notes::Note;
use crate::profile::{PersonalityMode, Profile};
use crate::progress::{ProgressStat, StudyStreak};
use crate::quizzes::QuizResult;
use crate::storage::{EntityId, Result, StudentId};
use crate::StudyStore;

pub struct StudySession<'a> {
    store: &'a StudyStore,
    student: StudentId,
}

impl<'a> StudySession<'a> {
    pub(crate) fn new(store: &'a StudyStore, student: StudentId) -> Self {
        Self { store, student }
    }

    pub fn student(&self) -> &StudentId {
        &self.student
    }

    // ===== Profile =====

    pub fn create_profile(
        &self,
        display_name: String,
        personality_mode: PersonalityMode,
        preferred_language: String,
    ) -> Result<Profile> {
        self.store.profiles.create_profile(
            &self.student,
            display_name,
            personality_mode,
            preferred_language,
        )
    }

    pub fn update_profile(
        &self,
        display_name: String,
        personality_mode: PersonalityMode,
        preferred_language: String,
    ) -> Result<Profile> {
        self.store.profiles.update_profile(
            &self.student,
            display_name,
            personality_mode,
            preferred_language,
        )
    }

    pub fn get_profile(&self) -> Result<Profile> {
        self.store.profiles.get_profile(&self.student)
    }

    // ===== Chat sessions =====

    /// Create a session and return its id
    pub fn create_chat_session(&self, title: String) -> EntityId {
        self.store
            .chat_sessions
            .create_session(&self.student, title)
            .id
    }

    pub fn add_message(
        &self,
        session_id: &EntityId,
        role: MessageRole,
        content: String,
    ) -> Result<ChatMessage> {
        self.store
            .chat_sessions
            .add_message(&self.student, session_id, role, content)
    }

    pub fn get_chat_sessions(&self) -> Vec<ChatSessionView> {
        self.store.chat_sessions.list_sessions(&self.student)
    }

    pub fn get_chat_messages(&self, session_id: &EntityId) -> Result<Vec<ChatMessage>> {
        self.store
            .chat_sessions
            .get_messages(&self.student, session_id)
    }

    pub fn delete_chat_session(&self, session_id: &EntityId) {
        self.store
            .chat_sessions
            .delete_session(&self.student, session_id)
    }

    // ===== Notes =====

    pub fn create_note(&self, title: String, content: String, topic: String) -> Note {
        self.store
            .notes
            .create_note(&self.student, title, content, topic)
    }

    pub fn update_note(&self, note_id: &EntityId, title: String, content: String, topic: String) {
        self.store
            .notes
            .update_note(&self.student, note_id, title, content, topic)
    }

    pub fn delete_note(&self, note_id: &EntityId) {
        self.store.notes.delete_note(&self.student, note_id)
    }

    pub fn get_notes(&self) -> Vec<Note> {
        self.store.notes.list_notes(&self.student)
    }

    pub fn get_note(&self, note_id: &EntityId) -> Result<Note> {
        self.store.notes.get_note(&self.student, note_id)
    }

    // ===== Flashcards =====

    pub fn create_deck(&self, name: String, subject: String) -> FlashcardDeck {
        self.store.flashcards.create_deck(&self.student, name, subject)
    }

    pub fn add_card(&self, deck_id: &EntityId, front: String, back: String) -> Result<Flashcard> {
        self.store
            .flashcards
            .add_card(&self.student, deck_id, front, back)
    }

    pub fn get_decks(&self) -> Vec<FlashcardDeck> {
        self.store.flashcards.list_decks(&self.student)
    }

    pub fn get_deck_cards(&self, deck_id: &EntityId) -> Result<Vec<Flashcard>> {
        self.store.flashcards.get_deck_cards(&self.student, deck_id)
    }

    /// Legacy client-computed review values; see
    /// [`FlashcardStorage::update_card_review`].
    ///
    /// [`FlashcardStorage::update_card_review`]: crate::flashcards::FlashcardStorage::update_card_review
    pub fn update_card_review(
        &self,
        deck_id: &EntityId,
        card_id: &EntityId,
        interval_days: i32,
        ease_factor: f32,
    ) -> Result<()> {
        self.store.flashcards.update_card_review(
            &self.student,
            deck_id,
            card_id,
            interval_days,
            ease_factor,
        )
    }

    /// Rate a card; the store computes the new schedule
    pub fn submit_review(
        &self,
        deck_id: &EntityId,
        card_id: &EntityId,
        rating: ReviewRating,
    ) -> Result<Option<Flashcard>> {
        self.store
            .flashcards
            .submit_review(&self.student, deck_id, card_id, rating)
    }

    // ===== Quiz results =====

    /// Record an immutable result and return its id
    pub fn record_quiz_result(
        &self,
        subject: String,
        score: u32,
        total_questions: u32,
    ) -> EntityId {
        self.store
            .quizzes
            .record_result(&self.student, subject, score, total_questions)
            .id
    }

    pub fn get_quiz_results(&self) -> Vec<QuizResult> {
        self.store.quizzes.list_results(&self.student)
    }

    // ===== Goals =====

    pub fn create_goal(&self, title: String, description: String, target_date: NaiveDate) -> Goal {
        self.store
            .goals
            .create_goal(&self.student, title, description, target_date)
    }

    pub fn complete_goal(&self, goal_id: &EntityId) -> Result<Goal> {
        self.store.goals.complete_goal(&self.student, goal_id)
    }

    pub fn get_goals(&self) -> Vec<Goal> {
        self.store.goals.list_goals(&self.student)
    }

    // ===== Progress & streaks =====

    pub fn update_progress_stat(&self, subject: String, mastery_percent: f32) -> ProgressStat {
        self.store
            .progress
            .update_stat(&self.student, subject, mastery_percent)
    }

    pub fn get_progress_stats(&self) -> Vec<ProgressStat> {
        self.store.progress.list_stats(&self.student)
    }

    pub fn record_study_activity(&self) -> StudyStreak {
        self.store.progress.record_activity(&self.student)
    }

    pub fn get_study_streak(&self) -> StudyStreak {
        self.store.progress.get_streak(&self.student)
    }
}
