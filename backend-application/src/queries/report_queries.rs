use tracing::warn;

use backend_domain::{AccessLogEntry, Actor, CacheStatus, ReportDate, ReportView};

use crate::queries::preference_queries;
use crate::{cache, AppError, AppState};

#[derive(Debug, Default)]
pub struct ReportRequest {
    /// Canonical `YYYY-MM-DD`; the current local day when absent.
    pub date: Option<String>,
    pub refresh_cache: bool,
}

pub async fn daily_report(
    state: &AppState,
    actor: &Actor,
    request: ReportRequest,
    origin: &str,
) -> Result<ReportView, AppError> {
    state.metrics.record_report_request();

    let date = resolve_date(request.date.as_deref())?;
    let (rows, was_cache_hit) = cache::get_or_compute(state, &date, request.refresh_cache).await?;
    let visible_columns = preference_queries::visible_columns(state, &actor.id).await;

    record_access(state, actor, &date, was_cache_hit, origin);

    Ok(ReportView {
        date: date.as_str().to_string(),
        formatted_date: date.formatted(),
        was_cache_hit,
        visible_columns,
        rows,
    })
}

pub fn resolve_date(raw: Option<&str>) -> Result<ReportDate, AppError> {
    match raw {
        Some(value) if !value.trim().is_empty() => ReportDate::parse(value)
            .map_err(|err| AppError::validation("date", err.to_string())),
        _ => Ok(ReportDate::today()),
    }
}

/// Fire-and-forget: the audit trail must never block or fail the
/// response.
fn record_access(
    state: &AppState,
    actor: &Actor,
    date: &ReportDate,
    was_cache_hit: bool,
    origin: &str,
) {
    let entry = AccessLogEntry::new(
        &actor.id,
        date,
        CacheStatus::from_hit(was_cache_hit),
        origin,
    );
    let sink = state.access_log.clone();
    let metrics = state.metrics.clone();
    tokio::spawn(async move {
        if let Err(err) = sink.record(entry).await {
            metrics.record_audit_write_failure();
            warn!("access log write failed: {}", err);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_date_defaults_to_today() {
        let today = ReportDate::today();
        assert_eq!(resolve_date(None).expect("default"), today);
        assert_eq!(resolve_date(Some("  ")).expect("default"), today);
    }

    #[test]
    fn invalid_date_maps_to_a_validation_error_on_the_date_field() {
        let err = resolve_date(Some("2024-02-30")).expect_err("reject");
        match err {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "date");
                assert!(reason.contains("calendar"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
