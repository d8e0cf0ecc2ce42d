use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::r#trait::{SnapshotStore, StoreError};

/// File name used when no state path is configured.
pub const DEFAULT_STATE_FILE: &str = "conso-wms-state-v1.json";

/// JSON file holding the latest snapshot.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read_raw(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            // Non-UTF-8 content is corrupt data, not an unreachable store.
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!(path = %self.path.display(), "state file is not UTF-8");
                Ok(None)
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write_raw(&self, raw: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, raw).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), bytes = raw.len(), "state saved");
        Ok(())
    }
}
