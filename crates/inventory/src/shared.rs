//! Single-writer wrapper for callers that share one state across threads.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::state::InventoryState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedStateError {
    /// A previous holder panicked while mutating the state.
    #[error("inventory state lock poisoned")]
    Poisoned,
}

/// Shared handle to one `InventoryState`.
///
/// Each `with_state` call runs as a single critical section, so a transfer's
/// check and commit cannot interleave with another caller's mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedInventory {
    inner: Arc<Mutex<InventoryState>>,
}

impl SharedInventory {
    pub fn new(state: InventoryState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn with_state<R>(
        &self,
        f: impl FnOnce(&mut InventoryState) -> R,
    ) -> Result<R, SharedStateError> {
        let mut guard = self.inner.lock().map_err(|_| SharedStateError::Poisoned)?;
        Ok(f(&mut *guard))
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> Result<InventoryState, SharedStateError> {
        self.with_state(|state| state.clone())
    }
}
