//! Suggested work derived from the current stock.
//!
//! Both generators are greedy single-pass heuristics over SKUs in insertion
//! order. Neither touches the ledger.

use crate::model::{ConsolidationProposal, RemiseItem, RemiseStatus, RemiseTask};
use crate::state::InventoryState;

/// Upper bound on the units a single remise task moves.
pub const REMISE_MAX_UNITS: u64 = 5;

const CONSOLIDATION_REASON: &str = "reduce SKU fragmentation";

/// One task per SKU that has stock somewhere, taken from its first
/// non-empty location. Ids restart at `REM-0001` on every call.
pub fn remise_tasks(state: &InventoryState) -> Vec<RemiseTask> {
    state
        .skus()
        .into_iter()
        .filter_map(|sku| {
            let source = sku.locations.into_iter().find(|l| l.qty > 0)?;
            Some(RemiseItem {
                sku_id: sku.id,
                bin: source.bin,
                qty: source.qty.min(REMISE_MAX_UNITS),
            })
        })
        .enumerate()
        .map(|(i, item)| RemiseTask {
            id: format!("REM-{:04}", i + 1),
            items: vec![item],
            status: RemiseStatus::Pending,
        })
        .collect()
}

/// For each SKU spread over two or more locations, propose emptying its
/// smallest location into its largest one.
pub fn consolidation_proposals(state: &InventoryState) -> Vec<ConsolidationProposal> {
    let mut proposals = Vec::new();

    for sku in state.skus() {
        if sku.locations.len() < 2 {
            continue;
        }

        // Stable: equal quantities keep ledger order.
        let mut sorted = sku.locations;
        sorted.sort_by_key(|l| l.qty);

        let (Some(from), Some(to)) = (sorted.first(), sorted.last()) else {
            continue;
        };

        proposals.push(ConsolidationProposal {
            sku_id: sku.id,
            from_bin: from.bin.clone(),
            to_bin: to.bin.clone(),
            qty: from.qty,
            reason: CONSOLIDATION_REASON.to_string(),
        });
    }

    proposals
}
