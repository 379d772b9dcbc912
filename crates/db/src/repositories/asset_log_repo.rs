//! Repository for the append-only `asset_logs` table.

use assetdesk_core::asset_log::{AssetLog, AssetLogEntry};
use assetdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset_log::AssetLogRow;

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `asset_logs` SELECT queries. Every value column is TEXT,
/// read and written without casts.
const COLUMNS: &str = "\
    id, asset_id, action, field, old_value, new_value, \
    performed_by, created_at";

/// Column list for INSERT (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "asset_id, action, field, old_value, new_value, performed_by";

/// Number of bound parameters per inserted row.
const PARAMS_PER_ROW: usize = 6;

/// Default page size for history queries.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for history queries.
const MAX_LIMIT: i64 = 500;

// ---------------------------------------------------------------------------
// AssetLogRepo
// ---------------------------------------------------------------------------

/// Provides insert and query operations for asset logs.
pub struct AssetLogRepo;

impl AssetLogRepo {
    /// Batch insert asset log entries with a single multi-row INSERT.
    ///
    /// Returns the number of rows written.
    pub async fn batch_insert(
        pool: &PgPool,
        entries: &[AssetLogEntry],
    ) -> Result<u64, sqlx::Error> {
        if entries.is_empty() {
            return Ok(0);
        }

        let query = batch_insert_sql(entries.len());
        let mut q = sqlx::query(&query);
        for entry in entries {
            q = q
                .bind(entry.asset_id)
                .bind(entry.action.as_str())
                .bind(entry.field.as_deref())
                .bind(entry.old_value.as_deref())
                .bind(entry.new_value.as_deref())
                .bind(entry.performed_by.as_deref());
        }

        q.execute(pool).await.map(|r| r.rows_affected())
    }

    /// History of one asset, newest first.
    pub async fn list_for_asset(
        pool: &PgPool,
        asset_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<AssetLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM asset_logs \
             WHERE asset_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, AssetLogRow>(&query)
            .bind(asset_id)
            .bind(clamp_limit(limit))
            .fetch_all(pool)
            .await
            .map(|rows| rows.into_iter().map(AssetLog::from).collect())
    }
}

/// Page size within `1..=MAX_LIMIT`, defaulting to `DEFAULT_LIMIT`.
fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// `INSERT ... VALUES ($1, ..., $6), ($7, ...)` for `rows` rows.
fn batch_insert_sql(rows: usize) -> String {
    let mut query = format!("INSERT INTO asset_logs ({INSERT_COLUMNS}) VALUES ");
    for row in 0..rows {
        if row > 0 {
            query.push_str(", ");
        }
        let base = row * PARAMS_PER_ROW;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${})",
            base + 1,
            base + 2,
            base + 3,
            base + 4,
            base + 5,
            base + 6,
        ));
    }
    query
}
