//! MockServer Admin relay
//!
//! This server handles:
//! - Relaying expectation create/list/delete calls to MockServer's admin API
//! - Fetching and normalizing MockServer's request/response log
//! - Health-checking MockServer
//! - Serving the browser dashboard

mod config;
mod dashboard;
mod error;
mod routes;
mod upstream;

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mockadmin_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let mockserver_url = config.mockserver_url();

    let state = routes::AppState::new(config)?;
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("MockServer Admin listening on {}", addr);
    tracing::info!("Using MockServer at {}", mockserver_url);

    axum::serve(listener, app).await?;

    Ok(())
}
