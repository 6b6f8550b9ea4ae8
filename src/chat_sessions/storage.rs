use std::sync::Arc;

use super::models::*;
use crate::storage::{EntityId, Result, StoreCore, StoreError, StudentId};

/// Storage for AI chat sessions
///
/// Session lookup and append are strict: a missing session is an error, in
/// contrast to the lenient note mutations.
pub struct ChatSessionStorage {
    core: Arc<StoreCore>,
}

impl ChatSessionStorage {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self { core }
    }

    /// Create a session with an empty message list
    pub fn create_session(&self, student: &StudentId, title: String) -> ChatSession {
        let now = self.core.now();
        let id = self.core.mint_id();
        let session = ChatSession::new(id.clone(), title, now);
        self.core.with_student(student, |data| {
            data.chat_sessions.insert(id, session.clone());
        });
        session
    }

    /// Append a message with `timestamp = now`
    pub fn add_message(
        &self,
        student: &StudentId,
        session_id: &EntityId,
        role: MessageRole,
        content: String,
    ) -> Result<ChatMessage> {
        let now = self.core.now();
        self.core
            .mutate_student(student, |data| {
                let session = data
                    .chat_sessions
                    .get_mut(session_id)
                    .ok_or_else(|| StoreError::SessionNotFound(session_id.clone()))?;
                let message = ChatMessage {
                    role,
                    content,
                    timestamp: now,
                };
                session.messages.push(message.clone());
                Ok(message)
            })
            .unwrap_or_else(|| Err(StoreError::SessionNotFound(session_id.clone())))
    }

    /// List all sessions as transport views, most recently created first
    pub fn list_sessions(&self, student: &StudentId) -> Vec<ChatSessionView> {
        let mut views = self
            .core
            .read_student(student, |data| {
                data.chat_sessions
                    .values()
                    .map(ChatSessionView::from)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        // Sort by created_at descending (most recent first)
        views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        views
    }

    /// Ordered messages of one session
    pub fn get_messages(
        &self,
        student: &StudentId,
        session_id: &EntityId,
    ) -> Result<Vec<ChatMessage>> {
        self.core
            .read_student(student, |data| {
                data.chat_sessions
                    .get(session_id)
                    .map(|s| s.messages.clone())
            })
            .flatten()
            .ok_or_else(|| StoreError::SessionNotFound(session_id.clone()))
    }

    /// Delete a session; deleting an absent session is not an error
    pub fn delete_session(&self, student: &StudentId, session_id: &EntityId) {
        self.core.mutate_student(student, |data| {
            data.chat_sessions.remove(session_id);
        });
    }
}
