use assetdesk_core::ticket::SlaPolicy;
use assetdesk_core::types::DbId;
use sqlx::FromRow;

/// An `sla_policies` row.
#[derive(Debug, Clone, FromRow)]
pub struct SlaPolicyRow {
    pub id: DbId,
    pub priority: Option<String>,
    pub resolution_time_hours: Option<f64>,
}

impl From<SlaPolicyRow> for SlaPolicy {
    /// Missing columns become values the hours map will skip.
    fn from(row: SlaPolicyRow) -> Self {
        SlaPolicy {
            priority: row.priority.unwrap_or_default(),
            resolution_time_hours: row.resolution_time_hours.unwrap_or(f64::NAN),
        }
    }
}
