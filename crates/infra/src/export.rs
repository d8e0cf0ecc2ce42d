//! Downloadable JSON export of the full state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::snapshot::{StateSnapshot, WmsState};
use crate::snapshot_store::StoreError;

/// `wms-export-<epoch-ms>.json`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("wms-export-{}.json", now.timestamp_millis())
}

/// Pretty-printed snapshot, in the same layout as the persisted state.
pub fn export_json(state: &WmsState) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(&StateSnapshot::capture(state))?)
}

/// Write the export into `dir` and return the file's path.
pub fn write_export(dir: &Path, state: &WmsState, now: DateTime<Utc>) -> Result<PathBuf, StoreError> {
    let path = dir.join(export_filename(now));
    let json = export_json(state)?;

    fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "state exported");
    Ok(path)
}
