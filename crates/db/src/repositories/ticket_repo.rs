//! Read access to the `tickets` table.

use sqlx::PgPool;

use crate::models::ticket::TicketRow;

/// Column list for `tickets` SELECT queries. Timestamps are read as text.
const COLUMNS: &str = "\
    id, status, priority, \
    created_at::TEXT AS created_at, due_at::TEXT AS due_at";

/// Matches every ticket that is not closed, including NULL status.
const UNRESOLVED_FILTER: &str = "(status IS NULL OR LOWER(status) <> 'closed')";

/// Provides read operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// All tickets that are not closed, oldest first.
    pub async fn list_unresolved(pool: &PgPool) -> Result<Vec<TicketRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets \
             WHERE {UNRESOLVED_FILTER} \
             ORDER BY created_at ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, TicketRow>(&query).fetch_all(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_filter_keeps_null_status() {
        assert!(UNRESOLVED_FILTER.contains("status IS NULL OR"));
        assert!(UNRESOLVED_FILTER.starts_with('(') && UNRESOLVED_FILTER.ends_with(')'));
    }
}
