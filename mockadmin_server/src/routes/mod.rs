//! Route handlers for the relay

pub mod expectations;
pub mod health;
pub mod logs;

#[cfg(test)]
pub(crate) mod test_support;

use crate::{config::Config, dashboard, upstream::MockServerClient};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mockserver: MockServerClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let mockserver = MockServerClient::new(config.mockserver_url(), config.mockserver_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            mockserver,
        })
    }
}

/// Build the relay router: dashboard plus the `/api` surface
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::serve_dashboard))
        .merge(expectations::router())
        .merge(logs::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
