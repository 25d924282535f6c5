//! ICU AI Service - Main Entry Point

use api::{init_logging, run_server, ServiceConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load()?;
    init_logging(&config.logging)?;

    info!("=== ICU AI Service v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Training risk model on {} samples and bed model on {} samples",
        config.training.risk.samples, config.training.bed.samples
    );

    run_server(config).await
}
