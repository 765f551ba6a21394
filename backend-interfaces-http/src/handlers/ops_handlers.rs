use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::commands::cache_commands;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(Debug, Deserialize)]
pub struct InvalidateCachePayload {
    /// Day whose entry should be dropped; everything when absent.
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvalidateCacheResponse {
    pub success: bool,
    pub removed: usize,
}

pub async fn invalidate_cache(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<InvalidateCachePayload>,
) -> Result<Json<InvalidateCacheResponse>, HttpError> {
    if authorize(&state.config, &headers).is_none() {
        return Err(HttpError::Unauthorized);
    }
    let removed = cache_commands::invalidate_cache(&state, payload.date).await?;
    Ok(Json(InvalidateCacheResponse {
        success: true,
        removed,
    }))
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<AppState>) -> StatusCode {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);

    match timeout(timeout_duration, state.event_provider.ping()).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            error!("event provider ready check failed: {}", err);
            return StatusCode::SERVICE_UNAVAILABLE;
        }
        Err(_) => {
            error!("event provider ready check timeout after {}s", timeout_secs);
            return StatusCode::SERVICE_UNAVAILABLE;
        }
    }

    match timeout(timeout_duration, state.order_provider.ping()).await {
        Ok(Ok(())) => StatusCode::OK,
        Ok(Err(err)) => {
            error!("order provider ready check failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(_) => {
            error!("order provider ready check timeout after {}s", timeout_secs);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if authorize(&state.config, &headers).is_none() {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
