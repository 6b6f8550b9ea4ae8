//! Note CRUD operations
//!
//! Mutations here are lenient: updating or deleting a note that does not
//! exist is a successful no-op. Single-entity reads stay strict. The chat
//! session path errors on a missing target instead; the two policies are
//! kept distinct on purpose.

use std::sync::Arc;

use super::models::Note;
use crate::storage::{EntityId, Result, StoreCore, StoreError, StudentId};

pub struct NoteStorage {
    core: Arc<StoreCore>,
}

impl NoteStorage {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self { core }
    }

    pub fn create_note(
        &self,
        student: &StudentId,
        title: String,
        content: String,
        topic: String,
    ) -> Note {
        let now = self.core.now();
        let id = self.core.mint_id();
        let note = Note::new(id.clone(), title, content, topic, now);
        self.core.with_student(student, |data| {
            data.notes.insert(id, note.clone());
        });
        note
    }

    /// Replace title, content, and topic; `id` and `created_at` are
    /// preserved and `updated_at` becomes now. A missing note is ignored.
    pub fn update_note(
        &self,
        student: &StudentId,
        note_id: &EntityId,
        title: String,
        content: String,
        topic: String,
    ) {
        let now = self.core.now();
        self.core.mutate_student(student, |data| {
            match data.notes.get_mut(note_id) {
                Some(note) => {
                    note.title = title;
                    note.content = content;
                    note.topic = topic;
                    note.updated_at = now;
                }
                None => {
                    log::debug!("ignoring update for missing note {}", note_id);
                }
            }
        });
    }

    /// Delete if present; absence is not an error
    pub fn delete_note(&self, student: &StudentId, note_id: &EntityId) {
        self.core.mutate_student(student, |data| {
            data.notes.remove(note_id);
        });
    }

    pub fn list_notes(&self, student: &StudentId) -> Vec<Note> {
        let mut notes = self
            .core
            .read_student(student, |data| {
                data.notes.values().cloned().collect::<Vec<_>>()
            })
            .unwrap_or_default();
        notes.sort_by(|a, b| a.id.cmp(&b.id));
        notes
    }

    pub fn get_note(&self, student: &StudentId, note_id: &EntityId) -> Result<Note> {
        self.core
            .read_student(student, |data| data.notes.get(note_id).cloned())
            .flatten()
            .ok_or_else(|| StoreError::NoteNotFound(note_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::clock::test_clock::ManualClock;
    use crate::StudyStore;

    fn test_store() -> StudyStore {
        StudyStore::with_clock(Arc::new(ManualClock::new()))
    }

    #[test]
    fn test_create_and_read_back() {
        let store = test_store();
        let student = StudentId::new("s1");

        let note = store.notes.create_note(
            &student,
            "Osmosis".to_string(),
            "Water moves across membranes".to_string(),
            "biology".to_string(),
        );

        let fetched = store.notes.get_note(&student, &note.id).unwrap();
        assert_eq!(fetched.title, "Osmosis");
        assert_eq!(fetched.topic, "biology");
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[test]
    fn test_update_bumps_updated_at_only() {
        let clock = Arc::new(ManualClock::new());
        let store = StudyStore::with_clock(clock.clone());
        let student = StudentId::new("s1");

        let note = store.notes.create_note(
            &student,
            "Osmosis".to_string(),
            "v1".to_string(),
            "biology".to_string(),
        );

        clock.advance(Duration::hours(2));
        store.notes.update_note(
            &student,
            &note.id,
            "Osmosis".to_string(),
            "v2".to_string(),
            "biology".to_string(),
        );

        let updated = store.notes.get_note(&student, &note.id).unwrap();
        assert_eq!(updated.content, "v2");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > updated.created_at);
    }

    #[test]
    fn test_update_and_delete_missing_are_silent() {
        let store = test_store();
        let student = StudentId::new("s1");
        let ghost = EntityId::from("ghost");

        store.notes.update_note(
            &student,
            &ghost,
            "t".to_string(),
            "c".to_string(),
            "x".to_string(),
        );
        store.notes.delete_note(&student, &ghost);

        // Missing single-entity read is still an error
        let err = store.notes.get_note(&student, &ghost).unwrap_err();
        assert!(matches!(err, StoreError::NoteNotFound(_)));
    }

    #[test]
    fn test_delete_twice_is_safe() {
        let store = test_store();
        let student = StudentId::new("s1");

        let note = store.notes.create_note(
            &student,
            "temp".to_string(),
            "temp".to_string(),
            "misc".to_string(),
        );

        store.notes.delete_note(&student, &note.id);
        store.notes.delete_note(&student, &note.id);
        assert!(store.notes.list_notes(&student).is_empty());
    }

    #[test]
    fn test_students_are_isolated() {
        let store = test_store();
        let alice = StudentId::new("alice");
        let bob = StudentId::new("bob");

        let note = store.notes.create_note(
            &alice,
            "private".to_string(),
            "alice's".to_string(),
            "misc".to_string(),
        );

        assert!(store.notes.list_notes(&bob).is_empty());
        assert!(store.notes.get_note(&bob, &note.id).is_err());

        // A cross-student delete must not reach alice's note
        store.notes.delete_note(&bob, &note.id);
        assert!(store.notes.get_note(&alice, &note.id).is_ok());
    }
}
