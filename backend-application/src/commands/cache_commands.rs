use tracing::info;

use crate::queries::report_queries;
use crate::{cache, AppError, AppState};

/// Invalidation entry point for upstream order/event write hooks. With
/// a date, only that day's entry is deleted; without one the whole
/// subsystem cache is dropped, since the affected day is unknown.
pub async fn invalidate_cache(
    state: &AppState,
    raw_date: Option<String>,
) -> Result<usize, AppError> {
    let date = match raw_date {
        Some(value) if !value.trim().is_empty() => {
            Some(report_queries::resolve_date(Some(value.as_str()))?)
        }
        _ => None,
    };
    let removed = cache::invalidate(state, date.as_ref()).await;
    match &date {
        Some(date) => info!("cache invalidated for {} ({} entries)", date, removed),
        None => info!("cache invalidated for all dates ({} entries)", removed),
    }
    Ok(removed)
}
