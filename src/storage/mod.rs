//! Student-partitioned collection store
//!
//! The core abstraction of the crate: a concurrent map from an opaque
//! student identity to that student's named collections, created lazily on
//! first write. Domain modules layer their operations on top of
//! [`StoreCore`]; [`snapshots`] adds optional JSON durability.

mod student_map;
pub mod snapshots;

pub use snapshots::SnapshotStore;
pub use student_map::{
    Collection, EntityId, IdGenerator, Result, StoreCore, StoreError, StudentData, StudentId,
    StudentMap,
};
