//! Studium: per-student data store and spaced repetition engine for an AI
//! study assistant.
//!
//! The host supplies two things: an opaque [`StudentId`] for every caller
//! (its login layer) and a [`Clock`]. Everything a student owns (profile,
//! chat transcripts, notes, flashcard decks, quiz history, goals, progress
//! stats, and the study streak) lives in that student's isolated partition
//! of one concurrent in-memory map. Review scheduling and streak arithmetic
//! are pure functions layered on top.
//!
//! Typical embedding:
//!
//! ```
//! use studium::{StudentId, StudyStore};
//!
//! let store = StudyStore::new();
//! let session = store.session(StudentId::new("token-from-login"));
//!
//! let deck = session.create_deck("Bio".to_string(), "Biology".to_string());
//! session.add_card(&deck.id, "Powerhouse?".to_string(), "Mitochondria".to_string()).unwrap();
//! ```
//!
//! Operations are synchronous and atomic per student; operations for
//! different students never contend. Durability is opt-in through
//! [`storage::SnapshotStore`].

use std::sync::Arc;

pub mod chat_sessions;
pub mod clock;
pub mod flashcards;
pub mod goals;
pub mod notes;
pub mod profile;
pub mod progress;
pub mod quizzes;
pub mod session;
pub mod storage;

use chat_sessions::ChatSessionStorage;
use clock::{Clock, SystemClock};
use flashcards::FlashcardStorage;
use goals::GoalStorage;
use notes::NoteStorage;
use profile::ProfileStorage;
use progress::ProgressStorage;
use quizzes::QuizStorage;
use storage::{StoreCore, StudentData, StudentMap};

pub use session::StudySession;
pub use storage::{EntityId, StoreError, StudentId};

/// The assistant's data store: every domain storage wired over one shared
/// core (student map + clock + id generator).
pub struct StudyStore {
    core: Arc<StoreCore>,
    pub profiles: ProfileStorage,
    pub chat_sessions: ChatSessionStorage,
    pub notes: NoteStorage,
    pub flashcards: FlashcardStorage,
    pub quizzes: QuizStorage,
    pub goals: GoalStorage,
    pub progress: ProgressStorage,
}

impl StudyStore {
    /// Store on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Store on a host-supplied clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let core = Arc::new(StoreCore::new(clock));
        Self {
            profiles: ProfileStorage::new(core.clone()),
            chat_sessions: ChatSessionStorage::new(core.clone()),
            notes: NoteStorage::new(core.clone()),
            flashcards: FlashcardStorage::new(core.clone()),
            quizzes: QuizStorage::new(core.clone()),
            goals: GoalStorage::new(core.clone()),
            progress: ProgressStorage::new(core.clone()),
            core,
        }
    }

    /// Bind the flat operation surface to one caller identity
    pub fn session(&self, student: StudentId) -> StudySession<'_> {
        StudySession::new(self, student)
    }

    /// All student partitions, for snapshotting
    pub fn students(&self) -> &StudentMap {
        self.core.students()
    }

    /// Install a partition loaded from a snapshot, replacing any in-memory
    /// state for that student
    pub fn restore_student(&self, student: StudentId, data: StudentData) {
        self.core.restore(student, data);
    }
}

impl Default for StudyStore {
    fn default() -> Self {
        Self::new()
    }
}
