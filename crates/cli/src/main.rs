use clap::Parser;

use wms_cli::args::Cli;

/// Errors propagate to the runtime, which prints the context chain once and
/// exits non-zero.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wms_observability::init();
    wms_cli::run(Cli::parse()).await
}
