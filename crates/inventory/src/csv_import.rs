//! Flat inventory CSV ingestion.
//!
//! Format: a header line followed by `sku,description,bin,qty,capacity`
//! rows. Values are split on bare commas; quoting is not supported, so a
//! description containing a comma shifts the remaining fields. Parsing is
//! lenient and never fails: unusable rows are dropped.
//!
//! The ledger total must fit in a `u64`, so every per-SKU and per-bin sum
//! does too. A row whose quantity would push the running total past that
//! limit is dropped like any other malformed row.

use indexmap::IndexMap;

use wms_core::{BinId, SkuId};

use crate::model::{BinRecord, SkuRecord, StockEntry};

/// Result of parsing one CSV document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvImport {
    pub skus: IndexMap<SkuId, SkuRecord>,
    pub bins: IndexMap<BinId, BinRecord>,
    pub stock: Vec<StockEntry>,
    /// Data lines after the header, counted whether or not they were merged.
    pub rows_imported: usize,
}

#[derive(Debug)]
struct CsvRow<'a> {
    sku: &'a str,
    description: &'a str,
    bin: &'a str,
    qty: u64,
    capacity: u64,
}

#[derive(Debug)]
enum RowRejection {
    MissingSku,
    MissingBin,
    BadNumber(&'static str),
    TotalOverflow,
}

pub fn parse_inventory_csv(text: &str) -> CsvImport {
    let mut import = CsvImport::default();
    let mut total: u64 = 0;

    // Header is discarded without looking at it.
    let rows = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1);

    for (index, line) in rows.enumerate() {
        import.rows_imported += 1;

        let parsed = parse_row(line).and_then(|row| {
            total = total.checked_add(row.qty).ok_or(RowRejection::TotalOverflow)?;
            Ok(row)
        });
        let row = match parsed {
            Ok(row) => row,
            Err(reason) => {
                tracing::debug!(row = index + 1, ?reason, "dropping CSV row");
                continue;
            }
        };

        let sku_id = SkuId::new(row.sku);
        let bin_id = BinId::new(row.bin);

        import.skus.entry(sku_id.clone()).or_insert_with(|| SkuRecord {
            id: sku_id.clone(),
            description: (!row.description.is_empty()).then(|| row.description.to_string()),
        });
        import.bins.entry(bin_id.clone()).or_insert_with(|| BinRecord {
            id: bin_id.clone(),
            capacity: row.capacity,
        });
        import.stock.push(StockEntry {
            bin: bin_id,
            sku_id,
            qty: row.qty,
        });
    }

    import
}

fn parse_row(line: &str) -> Result<CsvRow<'_>, RowRejection> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let field = |i: usize| fields.get(i).copied().unwrap_or("");

    let row = CsvRow {
        sku: field(0),
        description: field(1),
        bin: field(2),
        qty: parse_count(field(3)).ok_or(RowRejection::BadNumber("qty"))?,
        capacity: parse_count(field(4)).ok_or(RowRejection::BadNumber("capacity"))?,
    };

    if row.sku.is_empty() {
        return Err(RowRejection::MissingSku);
    }
    if row.bin.is_empty() {
        return Err(RowRejection::MissingBin);
    }
    Ok(row)
}

/// Empty means zero; anything else must be a non-negative integer.
fn parse_count(raw: &str) -> Option<u64> {
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}
