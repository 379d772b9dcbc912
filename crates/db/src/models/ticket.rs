use assetdesk_core::ticket::{Ticket, TicketStatus};
use assetdesk_core::types::DbId;
use sqlx::FromRow;

/// A `tickets` row. Timestamps are selected as text so a malformed value
/// reaches the SLA evaluator instead of failing the query. A NULL status
/// reads as `Open`.
#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub id: DbId,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub created_at: Option<String>,
    pub due_at: Option<String>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            status: TicketStatus::parse_lenient(row.status.as_deref().unwrap_or_default()),
            priority: row.priority,
            created_at: row.created_at,
            due_at: row.due_at,
        }
    }
}
