//! Scanner input classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Bin, Sku};

const ITEM_PREFIX: &str = "ITEM-";
const BIN_PREFIX: &str = "BIN-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanKind {
    Item,
    Bin,
    Unknown,
}

/// A decoded scan. `payload` is the normalized code with any prefix removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(rename = "type")]
    pub kind: ScanKind,
    pub payload: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Entity a scan resolved to (`None` inside when the payload matched nothing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScanMatch {
    Item(Option<Sku>),
    Bin(Option<Bin>),
}

pub fn decode_scan(code: &str) -> ScanResult {
    decode_scan_at(code, Utc::now())
}

/// Classify `code` by prefix after trimming and uppercasing it.
pub fn decode_scan_at(code: &str, timestamp: DateTime<Utc>) -> ScanResult {
    let value = code.trim().to_uppercase();

    let (kind, payload) = if let Some(rest) = value.strip_prefix(ITEM_PREFIX) {
        (ScanKind::Item, rest.to_string())
    } else if let Some(rest) = value.strip_prefix(BIN_PREFIX) {
        (ScanKind::Bin, rest.to_string())
    } else {
        (ScanKind::Unknown, value)
    };

    ScanResult {
        kind,
        payload,
        timestamp,
    }
}
