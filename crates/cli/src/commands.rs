//! Command dispatch over a loaded `WmsState`.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde_json::{json, Value as JsonValue};

use wms_ai::ConnectivityProbe;
use wms_infra::{write_export, WmsState};
use wms_inventory::{consolidation_proposals, decode_scan_at, parse_inventory_csv, TransferStock};

use crate::args::{AiCommand, Command};
use crate::render;

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Json(JsonValue),
    Text(String),
}

/// What a command printed and whether the state needs saving.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub output: Output,
    pub changed: bool,
}

impl Outcome {
    fn changed(value: JsonValue) -> Self {
        Self {
            output: Output::Json(value),
            changed: true,
        }
    }

    fn unchanged(value: JsonValue) -> Self {
        Self {
            output: Output::Json(value),
            changed: false,
        }
    }
}

/// Run `command` against `state`. On error `state` may not be saved.
pub async fn execute(
    command: Command,
    state: &mut WmsState,
    now: DateTime<Utc>,
) -> anyhow::Result<Outcome> {
    let outcome = match command {
        Command::Import { csv } => {
            let text = std::fs::read_to_string(&csv)
                .with_context(|| format!("reading {}", csv.display()))?;
            let import = parse_inventory_csv(&text);
            let rows_imported = import.rows_imported;
            state.inventory.replace_stock(import);
            Outcome::changed(json!({
                "rowsImported": rows_imported,
                "skus": state.inventory.sku_count(),
                "bins": state.inventory.bin_count(),
            }))
        }

        Command::Show => Outcome {
            output: Output::Text(render::sku_table(&state.inventory)),
            changed: false,
        },

        Command::Scan { code } => {
            let scan = decode_scan_at(&code, now);
            let mut value = serde_json::to_value(&scan)?;
            if let (Some(found), Some(obj)) = (state.inventory.resolve_scan(&scan), value.as_object_mut()) {
                obj.insert("match".to_string(), serde_json::to_value(found)?);
            }
            Outcome::unchanged(value)
        }

        Command::Remise => {
            let tasks = state.inventory.regenerate_remises();
            Outcome::changed(serde_json::to_value(tasks)?)
        }

        Command::Consolidate => {
            Outcome::unchanged(serde_json::to_value(consolidation_proposals(&state.inventory))?)
        }

        Command::Palette { order_ref } => {
            let palette = state.inventory.create_palette(order_ref.as_deref(), now);
            Outcome::changed(serde_json::to_value(palette)?)
        }

        Command::Transfer { from, to, sku, qty } => {
            let record = state.inventory.transfer(&TransferStock {
                from_bin: from,
                to_bin: to,
                sku_id: sku,
                qty,
                occurred_at: now,
            })?;
            Outcome::changed(serde_json::to_value(record)?)
        }

        Command::Export { dir } => {
            let path = write_export(&dir, state, now)?;
            Outcome::unchanged(json!({ "path": path.display().to_string() }))
        }

        Command::Settings {
            zone_priority,
            max_bin_capacity,
        } => {
            let mut changed = false;
            if let Some(zones) = zone_priority {
                state.settings.zone_priority = zones
                    .iter()
                    .map(|z| z.trim().to_uppercase())
                    .filter(|z| !z.is_empty())
                    .collect();
                changed = true;
            }
            if let Some(max) = max_bin_capacity {
                state.settings.max_bin_capacity = max;
                changed = true;
            }
            Outcome {
                output: Output::Json(serde_json::to_value(&state.settings)?),
                changed,
            }
        }

        Command::Ai(AiCommand::Configure {
            endpoint,
            api_key,
            prompt,
        }) => {
            let changed = endpoint.is_some() || api_key.is_some() || prompt.is_some();
            if let Some(endpoint) = endpoint {
                state.ai.endpoint = endpoint.trim().to_string();
            }
            if let Some(api_key) = api_key {
                state.ai.api_key = api_key.trim().to_string();
            }
            if let Some(prompt) = prompt {
                state.ai.prompt = Some(prompt).filter(|p| !p.trim().is_empty());
            }
            Outcome {
                output: Output::Json(json!({
                    "endpoint": state.ai.endpoint,
                    "apiKeySet": state.ai.bearer_token().is_some(),
                    "prompt": state.ai.prompt,
                })),
                changed,
            }
        }

        Command::Ai(AiCommand::Test { endpoint, api_key }) => {
            let endpoint = endpoint.unwrap_or_else(|| state.ai.endpoint.clone());
            let api_key = api_key.or_else(|| state.ai.bearer_token().map(str::to_string));
            let report = ConnectivityProbe::new()
                .check(&endpoint, api_key.as_deref())
                .await?;
            Outcome::unchanged(serde_json::to_value(report)?)
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wms_core::{BinId, DomainError, SkuId};

    const CSV: &str = "sku,description,bin,qty,capacity\n\
                       SKU1,Prod A,A01,5,50\n\
                       SKU1,Prod A,A02,3,50\n\
                       SKU2,,A01,2,50\n";

    fn at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    async fn imported() -> (WmsState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("stock.csv");
        std::fs::write(&csv, CSV).unwrap();

        let mut state = WmsState::default();
        let outcome = execute(Command::Import { csv }, &mut state, at()).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(
            outcome.output,
            Output::Json(json!({ "rowsImported": 3, "skus": 2, "bins": 2 }))
        );
        (state, dir)
    }

    fn json_of(outcome: Outcome) -> JsonValue {
        match outcome.output {
            Output::Json(value) => value,
            Output::Text(text) => panic!("expected json, got {text:?}"),
        }
    }

    #[tokio::test]
    async fn import_of_missing_file_fails_without_changes() {
        let mut state = WmsState::default();
        let err = execute(
            Command::Import {
                csv: "/definitely/not/here.csv".into(),
            },
            &mut state,
            at(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("reading"));
        assert_eq!(state, WmsState::default());
    }

    #[tokio::test]
    async fn scan_adds_match_only_for_item_and_bin() {
        let (mut state, _dir) = imported().await;

        let item = json_of(
            execute(Command::Scan { code: "item-sku1".into() }, &mut state, at())
                .await
                .unwrap(),
        );
        assert_eq!(item["type"], "ITEM");
        assert_eq!(item["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(item["match"]["totalQty"], 8);

        let missing = json_of(
            execute(Command::Scan { code: "BIN-Z9".into() }, &mut state, at())
                .await
                .unwrap(),
        );
        assert!(missing["match"].is_null());
        assert!(missing.as_object().unwrap().contains_key("match"));

        let unknown = json_of(
            execute(Command::Scan { code: "hello".into() }, &mut state, at())
                .await
                .unwrap(),
        );
        assert_eq!(unknown["type"], "UNKNOWN");
        assert!(!unknown.as_object().unwrap().contains_key("match"));
    }

    #[tokio::test]
    async fn transfer_errors_propagate_as_domain_errors() {
        let (mut state, _dir) = imported().await;
        let before = state.clone();

        let err = execute(
            Command::Transfer {
                from: BinId::new("A01"),
                to: BinId::new("A02"),
                sku: SkuId::new("SKU1"),
                qty: 0,
            },
            &mut state,
            at(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InvalidQuantity(_))
        ));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn transfer_and_palette_mark_state_changed() {
        let (mut state, _dir) = imported().await;

        let transfer = execute(
            Command::Transfer {
                from: BinId::new("A02"),
                to: BinId::new("A01"),
                sku: SkuId::new("SKU1"),
                qty: 3,
            },
            &mut state,
            at(),
        )
        .await
        .unwrap();
        assert!(transfer.changed);
        assert_eq!(json_of(transfer)["fromBin"], "A02");

        let palette = execute(Command::Palette { order_ref: None }, &mut state, at())
            .await
            .unwrap();
        assert!(palette.changed);
        let palette = json_of(palette);
        assert_eq!(palette["orderRef"], "N/A");
        assert_eq!(palette["id"], "PAL-1700000000000-1");
    }

    #[tokio::test]
    async fn read_only_commands_do_not_request_save() {
        let (mut state, dir) = imported().await;

        for command in [
            Command::Show,
            Command::Consolidate,
            Command::Settings {
                zone_priority: None,
                max_bin_capacity: None,
            },
            Command::Export {
                dir: dir.path().to_path_buf(),
            },
            Command::Ai(AiCommand::Configure {
                endpoint: None,
                api_key: None,
                prompt: None,
            }),
        ] {
            assert!(!execute(command, &mut state, at()).await.unwrap().changed);
        }
        assert!(dir.path().join("wms-export-1700000000000.json").exists());
    }

    #[tokio::test]
    async fn settings_normalize_zones() {
        let mut state = WmsState::default();
        let outcome = execute(
            Command::Settings {
                zone_priority: Some(vec![" c".into(), "a".into(), "".into()]),
                max_bin_capacity: Some(120),
            },
            &mut state,
            at(),
        )
        .await
        .unwrap();
        assert!(outcome.changed);
        assert_eq!(state.settings.zone_priority, vec!["C", "A"]);
        assert_eq!(state.settings.max_bin_capacity, 120);
    }

    #[tokio::test]
    async fn ai_configure_never_echoes_the_key() {
        let mut state = WmsState::default();
        let outcome = execute(
            Command::Ai(AiCommand::Configure {
                endpoint: Some("http://localhost:9".into()),
                api_key: Some("secret".into()),
                prompt: None,
            }),
            &mut state,
            at(),
        )
        .await
        .unwrap();
        assert!(outcome.changed);
        assert_eq!(state.ai.api_key, "secret");
        let value = json_of(outcome);
        assert_eq!(value["apiKeySet"], true);
        assert!(!value.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn ai_test_rejects_invalid_endpoint() {
        let mut state = WmsState::default();
        let result = execute(
            Command::Ai(AiCommand::Test {
                endpoint: Some("not a url".into()),
                api_key: None,
            }),
            &mut state,
            at(),
        )
        .await;
        assert!(result.is_err());
    }
}
