//! MockServer health probe

use crate::routes::AppState;
use axum::{extract::State, routing::get, Json, Router};
use mockadmin_common::HealthReport;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}

/// Always answers 200; `ok` tells whether MockServer is healthy
async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    tracing::info!("Checking MockServer at {}", state.mockserver.base_url());

    let report = match state.mockserver.status().await {
        Ok((status, data)) => HealthReport::answered(status.as_u16(), data),
        Err(e) => {
            tracing::error!("Health check error: {}", e);
            HealthReport::unreachable(e.to_string())
        }
    };

    Json(report)
}
