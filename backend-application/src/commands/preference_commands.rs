use backend_domain::{Actor, ReportColumn};

use crate::{AppError, AppState};

/// Overwrites the actor's column preference wholesale. Unrecognized
/// identifiers are silently dropped before persisting.
pub async fn save_columns(
    state: &AppState,
    actor: &Actor,
    raw_columns: Vec<String>,
) -> Result<Vec<ReportColumn>, AppError> {
    let columns = ReportColumn::parse_list(&raw_columns);
    state
        .preference_repo
        .save(&actor.id, &columns)
        .await
        .map_err(AppError::Internal)?;
    Ok(columns)
}
