//! Fake MockServer and relay harness for route tests

use super::{app, AppState};
use crate::config::Config;
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// A call received by the fake MockServer
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path_and_query: String,
    pub body: Value,
}

#[derive(Default)]
struct FakeState {
    calls: Mutex<Vec<RecordedCall>>,
    responses: HashMap<String, (StatusCode, Value)>,
}

/// Records every call and answers from a table keyed by path and query;
/// unknown paths get an empty 200
pub struct FakeMockServer {
    pub addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeMockServer {
    pub async fn start(responses: Vec<(&str, StatusCode, Value)>) -> Self {
        let state = Arc::new(FakeState {
            calls: Mutex::new(Vec::new()),
            responses: responses
                .into_iter()
                .map(|(path, status, body)| (path.to_string(), (status, body)))
                .collect(),
        });

        let router = Router::new().fallback(record).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self { addr, state }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map(|p| p.to_string())
        .unwrap_or_default();

    state.calls.lock().unwrap().push(RecordedCall {
        method,
        path_and_query: path_and_query.clone(),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    match state.responses.get(&path_and_query) {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// Start the relay against MockServer at `mockserver`; returns its base URL
pub async fn start_relay(mockserver: SocketAddr) -> String {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        mockserver_host: mockserver.ip().to_string(),
        mockserver_port: mockserver.port(),
        mockserver_timeout: Duration::from_secs(5),
        logs_page_size: 10,
    };
    let state = AppState::new(config).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.ok();
    });

    format!("http://{}", addr)
}

/// An address nothing is listening on
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
