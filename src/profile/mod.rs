//! Student profile management

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::ProfileStorage;
