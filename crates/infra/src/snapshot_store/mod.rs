//! Persistence boundary for whole-state snapshots.
//!
//! Stores only move raw JSON text; decoding, default backfill and capture
//! live in `crate::snapshot`, shared by every backend.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::{FileSnapshotStore, DEFAULT_STATE_FILE};
pub use in_memory::InMemorySnapshotStore;
pub use r#trait::{SnapshotStore, StoreError};
