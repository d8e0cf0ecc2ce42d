use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of one connectivity probe.
///
/// Any HTTP response counts as a report, including 4xx/5xx; `ok` is true only
/// for 2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityReport {
    pub ok: bool,
    pub status: u16,
    pub status_text: String,
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid endpoint: {0}")]
    InvalidInput(String),

    #[error("connection failed: {0}")]
    Transport(String),
}
