use std::path::PathBuf;

use clap::{Parser, Subcommand};

use wms_core::{BinId, SkuId};
use wms_infra::DEFAULT_STATE_FILE;
use wms_inventory::parse_quantity;

/// Warehouse stock, transfers and put-away tasks over a local state file.
#[derive(Parser, Debug)]
#[command(name = "wms")]
#[command(version)]
pub struct Cli {
    /// State file to load and save
    #[arg(long, global = true, env = "WMS_STATE_FILE", default_value = DEFAULT_STATE_FILE)]
    pub state: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace SKUs, bins and stock with the contents of a CSV file
    Import {
        /// Header line, then `sku,description,bin,qty,capacity` rows
        csv: PathBuf,
    },

    /// Print the SKU table
    Show,

    /// Decode a scanned code and look up what it refers to
    Scan { code: String },

    /// Regenerate put-away tasks
    Remise,

    /// List moves that would reduce SKU fragmentation
    Consolidate,

    /// Create a palette for an outbound order
    Palette {
        #[arg(long)]
        order_ref: Option<String>,
    },

    /// Move stock of one SKU between bins
    Transfer {
        #[arg(long)]
        from: BinId,
        #[arg(long)]
        to: BinId,
        #[arg(long)]
        sku: SkuId,
        #[arg(long, value_parser = parse_quantity, allow_hyphen_values = true)]
        qty: i64,
    },

    /// Write the full state as a JSON export file
    Export {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show or update operator settings
    Settings {
        /// Comma-separated zone order, e.g. A,B,C
        #[arg(long, value_delimiter = ',')]
        zone_priority: Option<Vec<String>>,
        #[arg(long)]
        max_bin_capacity: Option<u64>,
    },

    /// Assistant endpoint configuration
    #[command(subcommand)]
    Ai(AiCommand),
}

#[derive(Subcommand, Debug)]
pub enum AiCommand {
    /// Show or update the stored endpoint, key and prompt
    Configure {
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Probe the endpoint; flags override the stored config
    Test {
        #[arg(long, env = "WMS_AI_ENDPOINT")]
        endpoint: Option<String>,
        #[arg(long, env = "WMS_AI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}
