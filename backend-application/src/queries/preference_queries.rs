use tracing::warn;

use backend_domain::ReportColumn;

use crate::AppState;

/// The actor's saved column set, or the all-visible default for an
/// actor never seen before. A repository failure degrades to the
/// default rather than failing the report.
pub async fn visible_columns(state: &AppState, actor_id: &str) -> Vec<ReportColumn> {
    match state.preference_repo.load(actor_id).await {
        Ok(Some(columns)) if !columns.is_empty() => columns,
        Ok(_) => ReportColumn::default_visible(),
        Err(err) => {
            warn!("preference load failed for {}: {}", actor_id, err);
            ReportColumn::default_visible()
        }
    }
}
