//! AI chat transcripts, one session per conversation

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::ChatSessionStorage;
