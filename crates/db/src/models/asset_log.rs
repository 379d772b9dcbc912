//! Asset log row model. Rows are append-only (no `updated_at`).

use assetdesk_core::asset_log::{AssetLog, AssetLogAction, AssetLogEntry};
use assetdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An `asset_logs` row.
#[derive(Debug, Clone, FromRow)]
pub struct AssetLogRow {
    pub id: DbId,
    pub asset_id: DbId,
    pub action: String,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub performed_by: Option<String>,
    pub created_at: Timestamp,
}

impl From<AssetLogRow> for AssetLog {
    fn from(row: AssetLogRow) -> Self {
        AssetLog {
            id: row.id,
            entry: AssetLogEntry {
                asset_id: row.asset_id,
                action: AssetLogAction::parse(&row.action),
                field: row.field,
                old_value: row.old_value,
                new_value: row.new_value,
                performed_by: row.performed_by,
            },
            created_at: row.created_at,
        }
    }
}
