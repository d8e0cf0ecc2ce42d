//! The mutable inventory aggregate.
//!
//! Quantities are stored once, in an ordered ledger of `(bin, sku, qty)`
//! entries. `Sku` and `Bin` values handed out by this type are views built by
//! filtering that ledger, so a SKU's `total_qty` can never disagree with the
//! contents of the bins that hold it.

use indexmap::IndexMap;

use wms_core::{BinId, SkuId};

use crate::csv_import::CsvImport;
use crate::model::{
    Bin, BinContent, BinRecord, Location, Palette, RemiseTask, Sku, SkuRecord, StockEntry,
    Transfer,
};
use crate::scan::{ScanKind, ScanMatch, ScanResult};
use crate::tasks;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryState {
    pub(crate) skus: IndexMap<SkuId, SkuRecord>,
    pub(crate) bins: IndexMap<BinId, BinRecord>,
    pub(crate) stock: Vec<StockEntry>,
    pub(crate) remises: Vec<RemiseTask>,
    /// Most recent first.
    pub(crate) palettes: Vec<Palette>,
    /// Most recent first.
    pub(crate) transfers: Vec<Transfer>,
}

/// Raw parts used to rebuild a state from persisted data.
#[derive(Debug, Clone, Default)]
pub struct InventoryParts {
    pub skus: Vec<SkuRecord>,
    pub bins: Vec<BinRecord>,
    pub stock: Vec<StockEntry>,
    pub remises: Vec<RemiseTask>,
    pub palettes: Vec<Palette>,
    pub transfers: Vec<Transfer>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state from persisted parts.
    ///
    /// Ledger entries that reference a SKU or bin missing from the catalogs
    /// get a bare catalog record so every entry stays reachable. Entries that
    /// would push the ledger total past `u64::MAX` are dropped.
    pub fn restore(parts: InventoryParts) -> Self {
        let mut skus: IndexMap<SkuId, SkuRecord> = parts
            .skus
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();
        let mut bins: IndexMap<BinId, BinRecord> = parts
            .bins
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();

        let mut total: u64 = 0;
        let stock: Vec<StockEntry> = parts
            .stock
            .into_iter()
            .filter(|entry| match total.checked_add(entry.qty) {
                Some(sum) => {
                    total = sum;
                    true
                }
                None => {
                    tracing::warn!(bin = %entry.bin, sku = %entry.sku_id, qty = entry.qty, "dropping ledger entry: total overflow");
                    false
                }
            })
            .collect();

        for entry in &stock {
            skus.entry(entry.sku_id.clone()).or_insert_with(|| SkuRecord {
                id: entry.sku_id.clone(),
                description: None,
            });
            bins.entry(entry.bin.clone()).or_insert_with(|| BinRecord {
                id: entry.bin.clone(),
                capacity: 0,
            });
        }

        Self {
            skus,
            bins,
            stock,
            remises: parts.remises,
            palettes: parts.palettes,
            transfers: parts.transfers,
        }
    }

    /// Install a freshly parsed CSV snapshot.
    ///
    /// SKUs, bins and the ledger are replaced wholesale; the remise list and
    /// the palette/transfer logs are kept.
    pub fn replace_stock(&mut self, import: CsvImport) {
        tracing::info!(
            rows = import.rows_imported,
            skus = import.skus.len(),
            bins = import.bins.len(),
            entries = import.stock.len(),
            "replacing inventory from CSV import"
        );
        self.skus = import.skus;
        self.bins = import.bins;
        self.stock = import.stock;
    }

    pub fn contains_sku(&self, id: &str) -> bool {
        self.skus.contains_key(id)
    }

    pub fn contains_bin(&self, id: &str) -> bool {
        self.bins.contains_key(id)
    }

    pub fn sku_count(&self) -> usize {
        self.skus.len()
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn sku(&self, id: &str) -> Option<Sku> {
        self.skus.get(id).map(|record| self.sku_view(record))
    }

    /// All SKUs, in insertion order.
    pub fn skus(&self) -> Vec<Sku> {
        self.skus.values().map(|record| self.sku_view(record)).collect()
    }

    pub fn bin(&self, id: &str) -> Option<Bin> {
        self.bins.get(id).map(|record| self.bin_view(record))
    }

    /// All bins, in insertion order.
    pub fn bins(&self) -> Vec<Bin> {
        self.bins.values().map(|record| self.bin_view(record)).collect()
    }

    pub fn sku_records(&self) -> impl Iterator<Item = &SkuRecord> {
        self.skus.values()
    }

    pub fn bin_records(&self) -> impl Iterator<Item = &BinRecord> {
        self.bins.values()
    }

    pub fn stock(&self) -> &[StockEntry] {
        &self.stock
    }

    /// Units held across every bin.
    pub fn total_stock(&self) -> u64 {
        self.stock.iter().map(|e| e.qty).sum()
    }

    pub fn remises(&self) -> &[RemiseTask] {
        &self.remises
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Recompute the remise list, replacing the previous one.
    pub fn regenerate_remises(&mut self) -> &[RemiseTask] {
        self.remises = tasks::remise_tasks(self);
        tracing::debug!(tasks = self.remises.len(), "remise list regenerated");
        &self.remises
    }

    /// Look up the entity a decoded scan refers to.
    ///
    /// Returns `None` for unknown scans; for item/bin scans the inner
    /// `Option` is empty when nothing matches the payload.
    pub fn resolve_scan(&self, scan: &ScanResult) -> Option<ScanMatch> {
        match scan.kind {
            ScanKind::Item => Some(ScanMatch::Item(self.sku(&scan.payload))),
            ScanKind::Bin => Some(ScanMatch::Bin(self.bin(&scan.payload))),
            ScanKind::Unknown => None,
        }
    }

    /// Index of the first ledger entry for `sku` in `bin`.
    pub(crate) fn entry_index(&self, bin: &str, sku: &str) -> Option<usize> {
        self.stock
            .iter()
            .position(|e| e.bin.as_str() == bin && e.sku_id.as_str() == sku)
    }

    fn sku_view(&self, record: &SkuRecord) -> Sku {
        let locations: Vec<Location> = self
            .stock
            .iter()
            .filter(|e| e.sku_id == record.id)
            .map(|e| Location {
                bin: e.bin.clone(),
                qty: e.qty,
            })
            .collect();

        Sku {
            id: record.id.clone(),
            description: record.description.clone(),
            total_qty: locations.iter().map(|l| l.qty).sum(),
            locations,
        }
    }

    fn bin_view(&self, record: &BinRecord) -> Bin {
        Bin {
            id: record.id.clone(),
            current_skus: self
                .stock
                .iter()
                .filter(|e| e.bin == record.id)
                .map(|e| BinContent {
                    sku_id: e.sku_id.clone(),
                    qty: e.qty,
                })
                .collect(),
            capacity: record.capacity,
        }
    }
}
