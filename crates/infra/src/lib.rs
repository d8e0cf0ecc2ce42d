//! Infrastructure layer: state persistence and export.

pub mod export;
pub mod snapshot;
pub mod snapshot_store;


pub use export::{export_filename, export_json, write_export};
pub use snapshot::{load_snapshot, Settings, StateSnapshot, WmsState};
pub use snapshot_store::{
    FileSnapshotStore, InMemorySnapshotStore, SnapshotStore, StoreError, DEFAULT_STATE_FILE,
};
