//! Plain-text rendering for `wms show`.

use std::fmt::Write;

use wms_inventory::InventoryState;

const NO_DATA: &str = "no data";

/// SKU / description / total / locations, one SKU per line in import order.
pub fn sku_table(inventory: &InventoryState) -> String {
    let skus = inventory.skus();
    if skus.is_empty() {
        return NO_DATA.to_string();
    }

    let rows: Vec<[String; 4]> = skus
        .iter()
        .map(|sku| {
            let locations = sku
                .locations
                .iter()
                .map(|l| format!("{}:{}", l.bin, l.qty))
                .collect::<Vec<_>>()
                .join(", ");
            [
                sku.id.to_string(),
                sku.description.clone().unwrap_or_default(),
                sku.total_qty.to_string(),
                locations,
            ]
        })
        .collect();

    let header = ["SKU", "DESCRIPTION", "TOTAL", "LOCATIONS"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 4]| {
        let line = format!(
            "{:<w0$}  {:<w1$}  {:>w2$}  {}",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
        let _ = writeln!(out, "{}", line.trim_end());
    };

    push_row(header);
    for row in &rows {
        push_row([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]);
    }
    out.truncate(out.trim_end().len());
    out
}
