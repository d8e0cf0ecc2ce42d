//! Validated stock movement between bins.
//!
//! Split like a command handler: `check_transfer` decides against an
//! immutable state and produces a plan, `apply_transfer` performs the writes.
//! Nothing is written unless every check passed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wms_core::{BinId, DomainError, DomainResult, SkuId};

use crate::model::{StockEntry, Transfer};
use crate::state::InventoryState;

/// Command: move `qty` units of `sku_id` from `from_bin` to `to_bin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStock {
    pub from_bin: BinId,
    pub to_bin: BinId,
    pub sku_id: SkuId,
    /// Signed so that non-positive operator input reaches validation.
    pub qty: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Parse operator-entered quantity text.
///
/// Only checks that the text is an integer; positivity is enforced by the
/// transfer itself so that unknown bins are still reported first.
pub fn parse_quantity(raw: &str) -> DomainResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::invalid_quantity(format!("{raw:?} is not a number")))
}

#[derive(Debug)]
struct TransferPlan {
    source: usize,
    /// Destination entry and its quantity after the credit.
    target: Option<(usize, u64)>,
    qty: u64,
}

impl InventoryState {
    pub fn transfer(&mut self, cmd: &TransferStock) -> DomainResult<Transfer> {
        let plan = match self.check_transfer(cmd) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::warn!(
                    from = %cmd.from_bin,
                    to = %cmd.to_bin,
                    sku = %cmd.sku_id,
                    qty = cmd.qty,
                    error = %err,
                    "transfer rejected"
                );
                return Err(err);
            }
        };
        Ok(self.apply_transfer(plan, cmd))
    }

    fn check_transfer(&self, cmd: &TransferStock) -> DomainResult<TransferPlan> {
        if !self.contains_bin(cmd.from_bin.as_str()) {
            return Err(DomainError::not_found(format!("bin {}", cmd.from_bin)));
        }
        if !self.contains_bin(cmd.to_bin.as_str()) {
            return Err(DomainError::not_found(format!("bin {}", cmd.to_bin)));
        }
        if !self.contains_sku(cmd.sku_id.as_str()) {
            return Err(DomainError::not_found(format!("sku {}", cmd.sku_id)));
        }

        if cmd.qty <= 0 {
            return Err(DomainError::invalid_quantity(format!(
                "quantity must be positive (got {})",
                cmd.qty
            )));
        }
        let qty = cmd.qty as u64;

        // Only the first entry for the SKU in the source bin is considered.
        let source = self.entry_index(cmd.from_bin.as_str(), cmd.sku_id.as_str());
        let available = source.map(|i| self.stock[i].qty).unwrap_or(0);
        let Some(source) = source.filter(|_| available >= qty) else {
            return Err(DomainError::insufficient_stock(
                cmd.from_bin.as_str(),
                cmd.sku_id.as_str(),
                available,
                qty,
            ));
        };

        let target = match self.entry_index(cmd.to_bin.as_str(), cmd.sku_id.as_str()) {
            Some(i) => {
                let credited = self.stock[i].qty.checked_add(qty).ok_or_else(|| {
                    DomainError::invalid_quantity(format!(
                        "moving {qty} into bin {} would overflow its {} stock",
                        cmd.to_bin, cmd.sku_id
                    ))
                })?;
                Some((i, credited))
            }
            None => None,
        };

        Ok(TransferPlan {
            source,
            target,
            qty,
        })
    }

    fn apply_transfer(&mut self, plan: TransferPlan, cmd: &TransferStock) -> Transfer {
        self.stock[plan.source].qty -= plan.qty;

        match plan.target {
            Some((target, credited)) => self.stock[target].qty = credited,
            None => self.stock.push(StockEntry {
                bin: cmd.to_bin.clone(),
                sku_id: cmd.sku_id.clone(),
                qty: plan.qty,
            }),
        }

        let record = Transfer {
            from_bin: cmd.from_bin.clone(),
            to_bin: cmd.to_bin.clone(),
            sku_id: cmd.sku_id.clone(),
            qty: plan.qty,
            occurred_at: cmd.occurred_at,
        };
        self.transfers.insert(0, record.clone());

        tracing::info!(
            from = %record.from_bin,
            to = %record.to_bin,
            sku = %record.sku_id,
            qty = record.qty,
            "stock transferred"
        );
        record
    }
}
