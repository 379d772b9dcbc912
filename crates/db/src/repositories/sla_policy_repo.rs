//! Read access to the `sla_policies` table.

use sqlx::PgPool;

use crate::models::sla_policy::SlaPolicyRow;

/// Provides read operations for SLA policies.
pub struct SlaPolicyRepo;

impl SlaPolicyRepo {
    /// All policies in id order, so later rows win when priorities collide.
    pub async fn list(pool: &PgPool) -> Result<Vec<SlaPolicyRow>, sqlx::Error> {
        sqlx::query_as::<_, SlaPolicyRow>(
            "SELECT id, priority, resolution_time_hours::FLOAT8 AS resolution_time_hours \
             FROM sla_policies ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
