//! Palette records for outbound orders.

use chrono::{DateTime, Utc};

use wms_core::PaletteId;

use crate::model::Palette;
use crate::state::InventoryState;

/// Order reference recorded when none is given.
pub const DEFAULT_ORDER_REF: &str = "N/A";

impl InventoryState {
    /// Append a palette to the log (most recent first) and return it.
    ///
    /// The id combines the creation time with the palette's position in the
    /// append-only log, so two palettes created in the same millisecond
    /// still get distinct ids.
    pub fn create_palette(&mut self, order_ref: Option<&str>, created_at: DateTime<Utc>) -> Palette {
        let order_ref = order_ref
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_ORDER_REF);

        let seq = self.palettes.len() + 1;
        let palette = Palette {
            id: PaletteId::new(format!("PAL-{}-{seq}", created_at.timestamp_millis())),
            order_ref: order_ref.to_string(),
            created_at,
        };

        self.palettes.insert(0, palette.clone());
        tracing::info!(id = %palette.id, order_ref = %palette.order_ref, "palette created");
        palette
    }
}
