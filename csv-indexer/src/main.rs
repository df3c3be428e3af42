//! CSV indexer entry point.

use tracing::info;
use tracing_subscriber::EnvFilter;

use csv_indexer::{Config, Dependencies, IndexingError};

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let mut deps = Dependencies::new(config).await?;

    let summary = deps.orchestrator.run().await?;

    println!();
    println!("DONE!");

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Import finished"
    );

    Ok(())
}
