//! Inventory records and the read views derived from the stock ledger.
//!
//! Serialized field names follow the exported JSON format (`totalQty`,
//! `currentSKUs`, `ts`, ...), so these types double as the export shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wms_core::{BinId, Entity, PaletteId, SkuId};

/// One row of the stock ledger: `qty` units of `sku_id` stored in `bin`.
///
/// The ledger is the only place quantities live; SKU locations and bin
/// contents are both projections of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub bin: BinId,
    pub sku_id: SkuId,
    #[serde(default)]
    pub qty: u64,
}

/// Catalog data for a SKU (no quantities).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRecord {
    pub id: SkuId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Catalog data for a bin (no quantities).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinRecord {
    pub id: BinId,
    #[serde(default)]
    pub capacity: u64,
}

/// A SKU's quantity in one bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub bin: BinId,
    #[serde(default)]
    pub qty: u64,
}

/// SKU view: catalog data plus its locations in ledger order.
///
/// Quantity fields default when absent so stored views missing them still
/// load; `total_qty` is recomputed from the ledger anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub id: SkuId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub total_qty: u64,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl Entity for Sku {
    type Id = SkuId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A quantity of one SKU held by a bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinContent {
    pub sku_id: SkuId,
    #[serde(default)]
    pub qty: u64,
}

/// Bin view: catalog data plus the SKUs it currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub id: BinId,
    #[serde(rename = "currentSKUs", default)]
    pub current_skus: Vec<BinContent>,
    #[serde(default)]
    pub capacity: u64,
}

impl Bin {
    /// Units currently stored, across all SKUs.
    pub fn used(&self) -> u64 {
        self.current_skus.iter().map(|c| c.qty).fold(0, u64::saturating_add)
    }
}

impl Entity for Bin {
    type Id = BinId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Completed stock movement (immutable once recorded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from_bin: BinId,
    pub to_bin: BinId,
    pub sku_id: SkuId,
    pub qty: u64,
    #[serde(rename = "ts")]
    pub occurred_at: DateTime<Utc>,
}

/// Grouping record for an outbound order (immutable once created).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub id: PaletteId,
    pub order_ref: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemiseStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemiseItem {
    pub sku_id: SkuId,
    pub bin: BinId,
    pub qty: u64,
}

/// Suggested put-away task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemiseTask {
    pub id: String,
    pub items: Vec<RemiseItem>,
    pub status: RemiseStatus,
}

/// Advisory move that would reduce a SKU's fragmentation.
///
/// Proposals are never applied automatically; an operator realizes one by
/// issuing a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationProposal {
    pub sku_id: SkuId,
    pub from_bin: BinId,
    pub to_bin: BinId,
    pub qty: u64,
    pub reason: String,
}
