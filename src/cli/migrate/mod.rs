//! Migrate command - applies the PostgreSQL schema and exits

use anyhow::Context;
use tracing::info;

use crate::infrastructure::storage::{PostgresStore, StorageConfig};

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap();

    let StorageConfig::Postgres(pg_config) = config.storage.to_storage_config()? else {
        anyhow::bail!("migrate requires storage.backend = \"postgres\"");
    };

    let store = PostgresStore::connect(&pg_config)
        .await
        .context("connecting to PostgreSQL")?;
    let version = store.migrate().await?;

    info!(schema_version = ?version, "Migrations applied");

    Ok(())
}
