//! Inventory domain module (bins, SKUs, stock movements).
//!
//! This crate contains the warehouse business rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). Every operation
//! takes an explicit `InventoryState` handle; there is no ambient state.

pub mod csv_import;
pub mod model;
pub mod palette;
pub mod scan;
pub mod shared;
pub mod state;
pub mod tasks;
pub mod transfer;

pub use csv_import::{parse_inventory_csv, CsvImport};
pub use model::{
    Bin, BinContent, BinRecord, ConsolidationProposal, Location, Palette, RemiseItem,
    RemiseStatus, RemiseTask, Sku, SkuRecord, StockEntry, Transfer,
};
pub use palette::DEFAULT_ORDER_REF;
pub use scan::{decode_scan, decode_scan_at, ScanKind, ScanMatch, ScanResult};
pub use shared::{SharedInventory, SharedStateError};
pub use state::{InventoryParts, InventoryState};
pub use tasks::{consolidation_proposals, remise_tasks, REMISE_MAX_UNITS};
pub use transfer::{parse_quantity, TransferStock};
