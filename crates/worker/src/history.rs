//! Asset history lookup for the command line.

use assetdesk_core::asset_history::{timeline, TimelineEntry};
use assetdesk_core::types::DbId;
use assetdesk_db::repositories::AssetLogRepo;
use assetdesk_db::DbPool;

/// Load an asset's log rows (newest first) and render them.
///
/// No user directory is available here, so actors render as `User` or
/// `System`.
pub async fn load_timeline(
    pool: &DbPool,
    asset_id: DbId,
    limit: Option<i64>,
) -> Result<Vec<TimelineEntry>, sqlx::Error> {
    let logs = AssetLogRepo::list_for_asset(pool, asset_id, limit).await?;
    Ok(timeline(&logs, None))
}

/// One printable line per timeline entry.
pub fn render_line(entry: &TimelineEntry) -> String {
    format!(
        "{}  {}",
        entry.at.format("%Y-%m-%d %H:%M:%S UTC"),
        entry.sentence
    )
}
