use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::EntityId;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A full chat session with all messages
///
/// Messages are append-only and kept in insertion order; the timestamp on
/// each message is advisory, not the sort key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: EntityId,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(id: EntityId, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            messages: Vec::new(),
            created_at,
        }
    }
}

/// A single message in a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Transport view of a session: summary fields plus the full message array,
/// with no internal wrappers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSessionView {
    pub id: EntityId,
    pub title: String,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

impl From<&ChatSession> for ChatSessionView {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            message_count: session.messages.len(),
            created_at: session.created_at,
            messages: session.messages.clone(),
        }
    }
}
