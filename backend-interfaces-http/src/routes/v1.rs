use axum::Router;

use backend_application::AppState;

use crate::handlers::{ops_handlers, report_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/report",
            axum::routing::get(report_handlers::get_report),
        )
        .route(
            "/v1/report/fetch",
            axum::routing::post(report_handlers::fetch_report),
        )
        .route(
            "/v1/report/columns",
            axum::routing::post(report_handlers::save_columns),
        )
        .route(
            "/v1/ops/cache/invalidate",
            axum::routing::post(ops_handlers::invalidate_cache),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
