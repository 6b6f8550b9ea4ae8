use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat_sessions::ChatSession;
use crate::clock::Clock;
use crate::flashcards::FlashcardDeck;
use crate::goals::Goal;
use crate::notes::Note;
use crate::profile::Profile;
use crate::progress::{ProgressStat, StudyStreak};
use crate::quizzes::QuizResult;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile already exists")]
    ProfileAlreadyExists,

    #[error("profile not found")]
    ProfileNotFound,

    #[error("chat session not found: {0}")]
    SessionNotFound(EntityId),

    #[error("note not found: {0}")]
    NoteNotFound(EntityId),

    #[error("deck not found: {0}")]
    DeckNotFound(EntityId),

    #[error("goal not found: {0}")]
    GoalNotFound(EntityId),

    #[error("data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Opaque caller identity supplied by the hosting environment.
///
/// Two distinct ids are fully isolated partitions; the store never compares
/// or merges data across them. Minting and verifying these tokens is the
/// host's login layer, not this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque entity identifier, unique within its collection and student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Mints entity ids from the clock reading plus a process-wide counter.
///
/// The fixed-width counter suffix keeps ids distinct when two creations land
/// on the same millisecond; the timestamp prefix keeps them distinct across
/// process restarts, where the counter starts over.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn mint(&self, now: DateTime<Utc>) -> EntityId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        EntityId(format!("{}-{:06x}", now.timestamp_millis(), seq))
    }
}

/// A keyed collection of entities within one student's partition.
///
/// Lookup order is unspecified; listings that need a presentation order sort
/// at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    entries: HashMap<EntityId, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> Collection<T> {
    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut T> {
        self.entries.get_mut(id)
    }

    /// Upsert; last write wins on the same id.
    pub fn insert(&mut self, id: EntityId, value: T) {
        self.entries.insert(id, value);
    }

    /// Remove if present; absence is not an error.
    pub fn remove(&mut self, id: &EntityId) -> Option<T> {
        self.entries.remove(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One student's partition: every collection the assistant keeps for them.
///
/// Created lazily on the student's first write; a read against an absent
/// partition sees empty collections.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentData {
    pub(crate) profile: Option<Profile>,
    pub(crate) chat_sessions: Collection<ChatSession>,
    pub(crate) notes: Collection<Note>,
    pub(crate) decks: Collection<FlashcardDeck>,
    pub(crate) quiz_results: Collection<QuizResult>,
    pub(crate) goals: Collection<Goal>,
    pub(crate) progress: BTreeMap<String, ProgressStat>,
    pub(crate) streak: Option<StudyStreak>,
}

/// Concurrent map of all student partitions.
pub type StudentMap = DashMap<StudentId, StudentData>;

/// Shared internals behind every domain storage: the student map, the clock,
/// and the id generator.
///
/// Each closure passed to the accessors below runs under that student's map
/// entry guard, making the whole operation atomic with respect to that
/// student. Operations on different students do not contend. Closures must
/// not touch another student's entry, which would risk a shard deadlock.
pub struct StoreCore {
    students: StudentMap,
    clock: std::sync::Arc<dyn Clock>,
    ids: IdGenerator,
}

impl StoreCore {
    pub(crate) fn new(clock: std::sync::Arc<dyn Clock>) -> Self {
        Self {
            students: StudentMap::new(),
            clock,
            ids: IdGenerator::default(),
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(crate) fn mint_id(&self) -> EntityId {
        self.ids.mint(self.clock.now())
    }

    /// Run `f` against the student's partition, creating it if absent.
    /// Used by creation paths.
    pub(crate) fn with_student<R>(
        &self,
        id: &StudentId,
        f: impl FnOnce(&mut StudentData) -> R,
    ) -> R {
        let mut entry = self.students.entry(id.clone()).or_default();
        f(entry.value_mut())
    }

    /// Run `f` against the student's partition only if it already exists.
    /// Used by mutations of existing entities, where an absent partition
    /// means the target entity cannot exist either.
    pub(crate) fn mutate_student<R>(
        &self,
        id: &StudentId,
        f: impl FnOnce(&mut StudentData) -> R,
    ) -> Option<R> {
        self.students.get_mut(id).map(|mut d| f(d.value_mut()))
    }

    /// Run `f` against a read-only view of the student's partition.
    pub(crate) fn read_student<R>(
        &self,
        id: &StudentId,
        f: impl FnOnce(&StudentData) -> R,
    ) -> Option<R> {
        self.students.get(id).map(|d| f(d.value()))
    }

    /// All partitions, for snapshotting.
    pub(crate) fn students(&self) -> &StudentMap {
        &self.students
    }

    /// Install a partition loaded from a snapshot, replacing any in-memory
    /// state for that student.
    pub(crate) fn restore(&self, id: StudentId, data: StudentData) {
        self.students.insert(id, data);
    }
}
