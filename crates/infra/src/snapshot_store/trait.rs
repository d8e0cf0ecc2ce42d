use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::{load_snapshot, StateSnapshot, WmsState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Keeps one serialized state snapshot.
///
/// Implementors provide raw text access; `load` and `save` are shared.
pub trait SnapshotStore {
    /// The stored text, or `None` if nothing was saved yet.
    fn read_raw(&self) -> Result<Option<String>, StoreError>;

    fn write_raw(&self, raw: &str) -> Result<(), StoreError>;

    /// Load the stored state.
    ///
    /// Absent or corrupt content yields the default state; only failures to
    /// reach the storage itself are errors, so a later `save` never silently
    /// overwrites data that merely could not be read.
    fn load(&self) -> Result<WmsState, StoreError> {
        let raw = self.read_raw()?;
        Ok(load_snapshot(raw.as_deref()).into_state())
    }

    fn save(&self, state: &WmsState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&StateSnapshot::capture(state))?;
        self.write_raw(&raw)
    }
}
