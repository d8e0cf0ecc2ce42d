//! `wms` command-line front end: argument parsing, command dispatch over a
//! loaded state, and output rendering.

pub mod args;
pub mod commands;
pub mod render;

use anyhow::Context;
use chrono::Utc;

use wms_infra::{FileSnapshotStore, SnapshotStore};

use crate::args::Cli;
use crate::commands::{execute, Output};

/// Load state, run one command, print its output, and save if it changed.
///
/// State is saved only after the command succeeded, so a failed operation
/// leaves the stored snapshot untouched.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = FileSnapshotStore::new(&cli.state);
    let mut state = store
        .load()
        .with_context(|| format!("loading state from {}", cli.state.display()))?;

    let outcome = execute(cli.command, &mut state, Utc::now()).await?;

    if outcome.changed {
        store
            .save(&state)
            .with_context(|| format!("saving state to {}", cli.state.display()))?;
    }

    match outcome.output {
        Output::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Output::Text(text) => println!("{text}"),
    }
    Ok(())
}
