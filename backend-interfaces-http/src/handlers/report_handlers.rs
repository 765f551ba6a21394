use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use backend_application::commands::preference_commands;
use backend_application::queries::report_queries::{self, ReportRequest};
use backend_application::{security, AppState};
use backend_domain::{OrderRow, ReportColumn, ReportView};

use crate::error::HttpError;
use crate::middleware::{authorize, extract_origin};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FetchReportPayload {
    pub date: Option<String>,
    /// `"1"` forces recomputation; anything else reads through the
    /// cache.
    #[serde(default)]
    pub refresh_cache: Option<String>,
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveColumnsPayload {
    pub csrf_token: String,
    pub visible_columns: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub success: bool,
    pub date: String,
    pub formatted_date: String,
    pub was_cache_hit: bool,
    pub visible_columns: Vec<ReportColumn>,
    pub rows: Vec<OrderRow>,
    /// Anti-forgery token for this actor's subsequent POSTs.
    pub csrf_token: String,
}

#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub success: bool,
    pub visible_columns: Vec<ReportColumn>,
}

fn report_response(view: ReportView, csrf_token: String) -> ReportResponse {
    ReportResponse {
        success: true,
        date: view.date,
        formatted_date: view.formatted_date,
        was_cache_hit: view.was_cache_hit,
        visible_columns: view.visible_columns,
        rows: view.rows,
        csrf_token,
    }
}

pub async fn get_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, HttpError> {
    let Some(actor) = authorize(&state.config, &headers) else {
        return Err(HttpError::Unauthorized);
    };
    let origin = extract_origin(&headers);
    let request = ReportRequest {
        date: query.date,
        refresh_cache: false,
    };
    let view = report_queries::daily_report(&state, &actor, request, &origin).await?;
    let csrf_token = security::issue_csrf_token(&state.config.csrf_secret, &actor.id)?;
    Ok(Json(report_response(view, csrf_token)))
}

pub async fn fetch_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<FetchReportPayload>,
) -> Result<Json<ReportResponse>, HttpError> {
    let Some(actor) = authorize(&state.config, &headers) else {
        return Err(HttpError::Unauthorized);
    };
    security::verify_csrf_token(&state.config.csrf_secret, &actor.id, &payload.csrf_token)?;

    let origin = extract_origin(&headers);
    let request = ReportRequest {
        date: payload.date,
        refresh_cache: payload.refresh_cache.as_deref() == Some("1"),
    };
    let view = report_queries::daily_report(&state, &actor, request, &origin).await?;
    let csrf_token = security::issue_csrf_token(&state.config.csrf_secret, &actor.id)?;
    Ok(Json(report_response(view, csrf_token)))
}

pub async fn save_columns(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SaveColumnsPayload>,
) -> Result<Json<ColumnsResponse>, HttpError> {
    let Some(actor) = authorize(&state.config, &headers) else {
        return Err(HttpError::Unauthorized);
    };
    security::verify_csrf_token(&state.config.csrf_secret, &actor.id, &payload.csrf_token)?;

    let visible_columns =
        preference_commands::save_columns(&state, &actor, payload.visible_columns).await?;
    Ok(Json(ColumnsResponse {
        success: true,
        visible_columns,
    }))
}
