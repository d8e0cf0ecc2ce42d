use std::sync::RwLock;

use super::r#trait::{SnapshotStore, StoreError};

/// In-memory snapshot slot.
///
/// Intended for tests/dev. Holds the raw text so corrupt content can be
/// seeded with `with_raw`.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slot: RwLock<Option<String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(raw.into())),
        }
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read_raw(&self) -> Result<Option<String>, StoreError> {
        let slot = self.slot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn write_raw(&self, raw: &str) -> Result<(), StoreError> {
        let mut slot = self.slot.write().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(raw.to_string());
        Ok(())
    }
}
