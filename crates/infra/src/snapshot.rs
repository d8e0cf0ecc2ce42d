//! Serialized form of the full application state.
//!
//! The JSON layout is the export format: SKU and bin views keyed by id, the
//! stock ledger, the remise list, the palette/transfer logs, operator
//! settings and the assistant config. Loading is forgiving: missing data,
//! corrupt JSON and partially-present records all fall back to defaults.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use wms_ai::AiConfig;
use wms_core::{BinId, Entity, SkuId};
use wms_inventory::{
    Bin, BinContent, BinRecord, InventoryParts, InventoryState, Palette, RemiseTask, Sku,
    SkuRecord, StockEntry, Transfer,
};

/// Operator preferences stored with the warehouse state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub zone_priority: Vec<String>,
    pub max_bin_capacity: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zone_priority: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            max_bin_capacity: 200,
        }
    }
}

/// Everything the application persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WmsState {
    pub inventory: InventoryState,
    pub settings: Settings,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    pub inventory: IndexMap<SkuId, Sku>,
    pub bins: IndexMap<BinId, Bin>,
    /// Authoritative quantities. Absent in snapshots written before the
    /// ledger existed; those are rebuilt from `bins`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<Vec<StockEntry>>,
    pub remises: Vec<RemiseTask>,
    pub palettes: Vec<Palette>,
    pub transfers: Vec<Transfer>,
    pub settings: Settings,
    pub ai: AiConfig,
}

impl StateSnapshot {
    pub fn capture(state: &WmsState) -> Self {
        let inventory = &state.inventory;
        Self {
            inventory: keyed_by_id(inventory.skus()),
            bins: keyed_by_id(inventory.bins()),
            stock: Some(inventory.stock().to_vec()),
            remises: inventory.remises().to_vec(),
            palettes: inventory.palettes().to_vec(),
            transfers: inventory.transfers().to_vec(),
            settings: state.settings.clone(),
            ai: state.ai.clone(),
        }
    }

    pub fn into_state(self) -> WmsState {
        let stock = match self.stock {
            Some(stock) => stock,
            None => legacy_ledger(&self.inventory, &self.bins),
        };

        let skus = self
            .inventory
            .into_iter()
            .map(|(id, sku)| SkuRecord {
                id,
                description: sku.description,
            })
            .collect();
        let bins = self
            .bins
            .into_iter()
            .map(|(id, bin)| BinRecord {
                id,
                capacity: bin.capacity,
            })
            .collect();

        WmsState {
            inventory: InventoryState::restore(InventoryParts {
                skus,
                bins,
                stock,
                remises: self.remises,
                palettes: self.palettes,
                transfers: self.transfers,
            }),
            settings: self.settings,
            ai: self.ai,
        }
    }
}

fn keyed_by_id<E: Entity>(entities: Vec<E>) -> IndexMap<E::Id, E> {
    entities.into_iter().map(|e| (e.id().clone(), e)).collect()
}

/// Rebuild a ledger for snapshots that carry only the SKU/bin views.
///
/// Bin contents win: they are what transfers used to update. SKU locations
/// are the fallback when no bin lists any content.
fn legacy_ledger(inventory: &IndexMap<SkuId, Sku>, bins: &IndexMap<BinId, Bin>) -> Vec<StockEntry> {
    let from_bins: Vec<StockEntry> = bins
        .iter()
        .flat_map(|(bin_id, bin)| {
            bin.current_skus.iter().map(move |BinContent { sku_id, qty }| StockEntry {
                bin: bin_id.clone(),
                sku_id: sku_id.clone(),
                qty: *qty,
            })
        })
        .collect();
    if !from_bins.is_empty() {
        return from_bins;
    }

    inventory
        .iter()
        .flat_map(|(sku_id, sku)| {
            sku.locations.iter().map(move |l| StockEntry {
                bin: l.bin.clone(),
                sku_id: sku_id.clone(),
                qty: l.qty,
            })
        })
        .collect()
}

/// Parse stored snapshot text, falling back to defaults.
///
/// `null` values are treated as absent, and every record type fills missing
/// keys from its `Default`, so a stored `{"settings": {"maxBinCapacity": 50}}`
/// keeps the default zone priority. Each top-level section decodes on its
/// own: a section that cannot be read falls back alone, and inside the keyed
/// maps and lists a bad record is skipped instead of sinking its neighbours.
pub fn load_snapshot(raw: Option<&str>) -> StateSnapshot {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        tracing::debug!("no stored state; using defaults");
        return StateSnapshot::default();
    };

    let mut value: JsonValue = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "stored state is not valid JSON; using defaults");
            return StateSnapshot::default();
        }
    };
    strip_nulls(&mut value);
    let JsonValue::Object(mut sections) = value else {
        tracing::warn!("stored state is not a JSON object; using defaults");
        return StateSnapshot::default();
    };

    StateSnapshot {
        inventory: keyed_section(&mut sections, "inventory"),
        bins: keyed_section(&mut sections, "bins"),
        stock: sections
            .remove("stock")
            .and_then(|value| list_records("stock", value)),
        remises: list_section(&mut sections, "remises"),
        palettes: list_section(&mut sections, "palettes"),
        transfers: list_section(&mut sections, "transfers"),
        settings: section(&mut sections, "settings"),
        ai: section(&mut sections, "ai"),
    }
}

fn section<T: DeserializeOwned + Default>(sections: &mut JsonMap<String, JsonValue>, key: &str) -> T {
    let Some(value) = sections.remove(key) else {
        return T::default();
    };
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(section = key, error = %e, "unreadable section; using defaults");
        T::default()
    })
}

fn list_section<T: DeserializeOwned>(sections: &mut JsonMap<String, JsonValue>, key: &str) -> Vec<T> {
    sections
        .remove(key)
        .and_then(|value| list_records(key, value))
        .unwrap_or_default()
}

/// Decode a JSON array record by record; `None` if the value is not an array.
fn list_records<T: DeserializeOwned>(key: &str, value: JsonValue) -> Option<Vec<T>> {
    let JsonValue::Array(items) = value else {
        tracing::warn!(section = key, "section is not a list; using defaults");
        return None;
    };
    Some(items.into_iter().filter_map(|item| record(key, item)).collect())
}

/// Decode an id-keyed object record by record. A record without an `id`
/// takes its map key.
fn keyed_section<E: Entity + DeserializeOwned>(
    sections: &mut JsonMap<String, JsonValue>,
    key: &str,
) -> IndexMap<E::Id, E> {
    let records = match sections.remove(key) {
        None => return IndexMap::new(),
        Some(JsonValue::Object(records)) => records,
        Some(_) => {
            tracing::warn!(section = key, "section is not an object; using defaults");
            return IndexMap::new();
        }
    };

    let decoded = records.into_iter().filter_map(|(id, mut item)| {
        if let JsonValue::Object(fields) = &mut item {
            fields.entry("id").or_insert(JsonValue::String(id));
        }
        record::<E>(key, item)
    });
    keyed_by_id(decoded.collect())
}

fn record<T: DeserializeOwned>(key: &str, item: JsonValue) -> Option<T> {
    serde_json::from_value(item)
        .map_err(|e| tracing::warn!(section = key, error = %e, "skipping unreadable record"))
        .ok()
}

fn strip_nulls(value: &mut JsonValue) {
    match value {
        JsonValue::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        JsonValue::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wms_inventory::{parse_inventory_csv, TransferStock};

    fn populated_state() -> WmsState {
        let mut inventory = InventoryState::new();
        inventory.replace_stock(parse_inventory_csv(
            "sku,description,bin,qty,capacity\n\
             SKU1,Prod A,A01,5,50\n\
             SKU2,,A01,2,50\n\
             SKU1,Prod A,B02,3,80",
        ));
        inventory
            .transfer(&TransferStock {
                from_bin: BinId::new("A01"),
                to_bin: BinId::new("B02"),
                sku_id: SkuId::new("SKU2"),
                qty: 1,
                occurred_at: Utc::now(),
            })
            .unwrap();
        inventory.create_palette(Some("ORD-7"), Utc::now());
        inventory.regenerate_remises();

        WmsState {
            inventory,
            settings: Settings::default(),
            ai: AiConfig {
                api_key: "k".to_string(),
                prompt: Some("summarize".to_string()),
                ..AiConfig::default()
            },
        }
    }

    #[test]
    fn absent_or_corrupt_data_loads_defaults() {
        assert_eq!(load_snapshot(None), StateSnapshot::default());
        assert_eq!(load_snapshot(Some("")), StateSnapshot::default());
        assert_eq!(load_snapshot(Some("{not json")), StateSnapshot::default());
        assert_eq!(load_snapshot(Some("[1,2,3]")), StateSnapshot::default());
        assert_eq!(load_snapshot(Some(r#"{"inventory": 42}"#)), StateSnapshot::default());
        assert_eq!(load_snapshot(Some("null")), StateSnapshot::default());
    }

    #[test]
    fn default_state_shape() {
        let state = load_snapshot(None).into_state();
        assert_eq!(state.inventory.sku_count(), 0);
        assert_eq!(state.settings.zone_priority, vec!["A", "B", "C"]);
        assert_eq!(state.settings.max_bin_capacity, 200);
        assert_eq!(state.ai.endpoint, wms_ai::DEFAULT_ENDPOINT);
        assert_eq!(state.ai.api_key, "");
    }

    #[test]
    fn partial_records_keep_their_defaults() {
        let snapshot = load_snapshot(Some(
            r#"{"settings": {"maxBinCapacity": 50}, "ai": {"apiKey": "abc"}, "palettes": null}"#,
        ));
        assert_eq!(snapshot.settings.max_bin_capacity, 50);
        assert_eq!(snapshot.settings.zone_priority, vec!["A", "B", "C"]);
        assert_eq!(snapshot.ai.api_key, "abc");
        assert_eq!(snapshot.ai.endpoint, wms_ai::DEFAULT_ENDPOINT);
        assert!(snapshot.palettes.is_empty());
    }

    #[test]
    fn capture_then_load_round_trips() {
        let state = populated_state();
        let json = serde_json::to_string_pretty(&StateSnapshot::capture(&state)).unwrap();

        let restored = load_snapshot(Some(&json)).into_state();
        assert_eq!(restored, state);
        assert_eq!(restored.inventory.skus(), state.inventory.skus());
        assert_eq!(restored.inventory.bins(), state.inventory.bins());
    }

    #[test]
    fn exported_json_uses_original_field_names() {
        let json = serde_json::to_value(StateSnapshot::capture(&populated_state())).unwrap();
        assert_eq!(json["inventory"]["SKU1"]["totalQty"], 8);
        assert_eq!(json["bins"]["A01"]["currentSKUs"][0]["skuId"], "SKU1");
        assert_eq!(json["transfers"][0]["fromBin"], "A01");
        assert!(json["transfers"][0]["ts"].is_string());
        assert_eq!(json["palettes"][0]["orderRef"], "ORD-7");
        assert_eq!(json["remises"][0]["status"], "pending");
        assert_eq!(json["settings"]["maxBinCapacity"], 200);
        assert_eq!(json["ai"]["apiKey"], "k");
    }

    #[test]
    fn load_keeps_stored_record_order() {
        let state = load_snapshot(Some(
            r#"{"inventory": {"Z9": {"id": "Z9"}, "A1": {"id": "A1"}},
                "bins": {"B2": {"id": "B2"}, "A1": {"id": "A1"}}}"#,
        ))
        .into_state();
        let skus: Vec<String> = state.inventory.skus().into_iter().map(|s| s.id.into_inner()).collect();
        assert_eq!(skus, vec!["Z9", "A1"]);
        let bins: Vec<String> = state.inventory.bins().into_iter().map(|b| b.id.into_inner()).collect();
        assert_eq!(bins, vec!["B2", "A1"]);
    }

    #[test]
    fn legacy_snapshot_rebuilds_ledger_from_bins() {
        let legacy = r#"{
            "inventory": {
                "SKU1": {"id": "SKU1", "description": "Prod A", "totalQty": 8,
                         "locations": [{"bin": "A01", "qty": 5}, {"bin": "A02", "qty": 3}]}
            },
            "bins": {
                "A01": {"id": "A01", "currentSKUs": [{"skuId": "SKU1", "qty": 2}], "capacity": 50},
                "A02": {"id": "A02", "currentSKUs": [{"skuId": "SKU1", "qty": 6}], "capacity": 50}
            },
            "transfers": [{"fromBin": "A01", "toBin": "A02", "skuId": "SKU1", "qty": 3,
                           "ts": "2024-05-01T10:00:00.000Z"}]
        }"#;

        let state = load_snapshot(Some(legacy)).into_state();
        let sku = state.inventory.sku("SKU1").unwrap();
        assert_eq!(sku.description.as_deref(), Some("Prod A"));
        assert_eq!(sku.total_qty, 8);
        assert_eq!(state.inventory.bin("A02").unwrap().used(), 6);
        assert_eq!(state.inventory.transfers().len(), 1);
    }

    #[test]
    fn legacy_snapshot_without_bins_uses_sku_locations() {
        let legacy = r#"{"inventory": {"SKU1": {"id": "SKU1", "totalQty": 4,
                          "locations": [{"bin": "A01", "qty": 4}]}}}"#;
        let state = load_snapshot(Some(legacy)).into_state();
        assert_eq!(state.inventory.bin("A01").unwrap().used(), 4);
    }

    #[test]
    fn sku_views_without_total_keep_inventory_and_settings() {
        let snapshot = load_snapshot(Some(
            r#"{"inventory": {"SKU1": {"id": "SKU1", "locations": [{"bin": "A01", "qty": 5}]}},
                "bins": {"A01": {"id": "A01", "capacity": 50}},
                "settings": {"maxBinCapacity": 75}}"#,
        ));
        assert_eq!(snapshot.settings.max_bin_capacity, 75);

        let state = snapshot.into_state();
        assert_eq!(state.inventory.sku_count(), 1);
        assert_eq!(state.inventory.sku("SKU1").unwrap().total_qty, 5);
        assert_eq!(state.inventory.bin("A01").unwrap().capacity, 50);
    }

    #[test]
    fn null_quantity_inside_a_list_counts_as_zero() {
        let state = load_snapshot(Some(
            r#"{"inventory": {"SKU1": {"id": "SKU1", "totalQty": 5,
                    "locations": [{"bin": "A01", "qty": 5}, {"bin": "A02", "qty": null}, null]}},
                "palettes": [{"id": "PAL-1-1", "orderRef": "N/A", "createdAt": "2024-05-01T10:00:00Z"}]}"#,
        ))
        .into_state();

        let sku = state.inventory.sku("SKU1").unwrap();
        assert_eq!(sku.locations.len(), 2);
        assert_eq!(sku.locations[1].qty, 0);
        assert_eq!(state.inventory.palettes().len(), 1);
    }

    #[test]
    fn bad_records_and_sections_fall_back_alone() {
        let snapshot = load_snapshot(Some(
            r#"{"inventory": {"SKU1": {"totalQty": 1, "locations": []}, "SKU2": {"locations": "oops"}},
                "palettes": [{"id": "PAL-1-1", "orderRef": "A", "createdAt": "2024-05-01T10:00:00Z"},
                             {"id": 7}],
                "transfers": "not a list",
                "settings": {"maxBinCapacity": "lots"},
                "ai": {"apiKey": "kept"}}"#,
        ));

        let ids: Vec<&str> = snapshot.inventory.keys().map(SkuId::as_str).collect();
        assert_eq!(ids, vec!["SKU1"]);
        assert_eq!(snapshot.palettes.len(), 1);
        assert!(snapshot.transfers.is_empty());
        assert_eq!(snapshot.settings, Settings::default());
        assert_eq!(snapshot.ai.api_key, "kept");
    }
}
