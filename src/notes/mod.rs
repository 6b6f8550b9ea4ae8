//! Study notes

pub mod models;
pub mod storage;

pub use models::Note;
pub use storage::NoteStorage;
