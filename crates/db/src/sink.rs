//! [`AssetLogSink`] backed by the `asset_logs` table.

use assetdesk_core::asset_log::AssetLogEntry;
use assetdesk_core::error::CoreError;
use assetdesk_core::log_sink::AssetLogSink;
use async_trait::async_trait;

use crate::repositories::AssetLogRepo;
use crate::DbPool;

/// Writes asset log batches with one multi-row INSERT each.
#[derive(Clone)]
pub struct PgAssetLogSink {
    pool: DbPool,
}

impl PgAssetLogSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetLogSink for PgAssetLogSink {
    async fn insert_logs(&self, entries: &[AssetLogEntry]) -> Result<(), CoreError> {
        let written = AssetLogRepo::batch_insert(&self.pool, entries)
            .await
            .map_err(|e| CoreError::Persistence(e.to_string()))?;
        tracing::trace!(written, "asset_logs insert");
        Ok(())
    }
}
