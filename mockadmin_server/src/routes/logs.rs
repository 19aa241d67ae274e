//! Request/response log routes

use crate::error::ApiError;
use crate::routes::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use mockadmin_common::{normalize_logs, LogEntry, LogPage, LogView, RenderedLog};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/logs", get(get_logs))
        .route("/api/logs/view", get(get_log_page))
        .route("/api/logs/rendered", get(get_rendered_logs))
}

#[derive(Debug, Default, Deserialize)]
struct LogPageQuery {
    filter: Option<String>,
    page: Option<usize>,
}

async fn fetch_logs(state: &AppState) -> Result<Vec<LogEntry>, ApiError> {
    tracing::info!("Retrieving logs from {}", state.mockserver.base_url());

    let raw = state
        .mockserver
        .retrieve_request_responses()
        .await
        .map_err(ApiError::upstream("retrieve logs"))?;

    Ok(normalize_logs(&raw))
}

/// All recorded request/response pairs, normalized
async fn get_logs(State(state): State<AppState>) -> Result<Json<Vec<LogEntry>>, ApiError> {
    Ok(Json(fetch_logs(&state).await?))
}

/// One filtered page of logs with bodies and headers rendered for display
async fn get_log_page(
    State(state): State<AppState>,
    query: Result<Query<LogPageQuery>, QueryRejection>,
) -> Result<Json<LogPage<RenderedLog>>, ApiError> {
    let Query(query) = query?;
    let view = LogView::new(fetch_logs(&state).await?, state.config.logs_page_size);
    let filter = query.filter.as_deref().unwrap_or_default().trim();

    let page = view
        .view(filter, query.page.unwrap_or(1))
        .map(RenderedLog::from);

    Ok(Json(page))
}

/// Every log entry, newest first, rendered for display
///
/// The dashboard pages and filters this snapshot locally until the next
/// refresh.
async fn get_rendered_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<RenderedLog>>, ApiError> {
    let view = LogView::new(fetch_logs(&state).await?, state.config.logs_page_size);
    let logs = view
        .filtered_sorted("")
        .into_iter()
        .map(RenderedLog::from)
        .collect();

    Ok(Json(logs))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{start_relay, FakeMockServer};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    const REQUEST_RESPONSES: &str = "/mockserver/retrieve?type=REQUEST_RESPONSES&format=JSON";

    fn recorded(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| {
                    json!({
                        "timestamp": format!("2024-03-01 10:00:{:02}.000", i),
                        "httpRequest": {
                            "method": "GET",
                            "path": if i % 2 == 0 { format!("/even/{}", i) } else { format!("/odd/{}", i) },
                            "headers": { "Host": ["localhost:1080"] }
                        },
                        "httpResponse": {
                            "statusCode": 200,
                            "body": { "type": "JSON", "value": "{\"n\":1}" }
                        }
                    })
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_logs_are_normalized() {
        let raw = json!([
            {
                "timestamp": "2024-03-01 10:00:00.000",
                "httpRequest": { "method": "POST", "path": "/a", "body": "hello" },
                "httpResponse": { "statusCode": 404 }
            },
            { "request": { "method": "GET", "path": "/b" } },
            {}
        ]);
        let mockserver =
            FakeMockServer::start(vec![(REQUEST_RESPONSES, StatusCode::OK, raw)]).await;
        let relay = start_relay(mockserver.addr).await;

        let logs: Value = reqwest::get(format!("{}/api/logs", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let logs = logs.as_array().unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0]["method"], "POST");
        assert_eq!(logs[0]["requestBody"], "hello");
        assert_eq!(logs[0]["responseStatusCode"], 404);
        assert_eq!(logs[1]["path"], "/b");
        assert_eq!(logs[1]["responseHeaders"], json!({}));
        assert_eq!(logs[2]["timestamp"], Value::Null);
        assert_eq!(logs[2]["method"], "");

        assert_eq!(mockserver.calls()[0].path_and_query, REQUEST_RESPONSES);
    }

    #[tokio::test]
    async fn test_logs_upstream_failure_carries_details() {
        let mockserver = FakeMockServer::start(vec![(
            REQUEST_RESPONSES,
            StatusCode::INTERNAL_SERVER_ERROR,
            json!("boom"),
        )])
        .await;
        let relay = start_relay(mockserver.addr).await;

        let response = reqwest::get(format!("{}/api/logs", relay)).await.unwrap();
        assert_eq!(response.status(), 500);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Failed to retrieve logs");
        assert_eq!(body["details"], "boom");
    }

    #[tokio::test]
    async fn test_log_page_view() {
        let mockserver =
            FakeMockServer::start(vec![(REQUEST_RESPONSES, StatusCode::OK, recorded(25))]).await;
        let relay = start_relay(mockserver.addr).await;

        let page: Value = reqwest::get(format!("{}/api/logs/view?page=3", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(page["page"], 3);
        assert_eq!(page["totalPages"], 3);
        assert_eq!(page["total"], 25);
        assert_eq!(page["items"].as_array().unwrap().len(), 5);

        let oldest = &page["items"][4];
        assert_eq!(oldest["path"], "/even/0");
        assert_eq!(oldest["statusCode"], "200");
        assert_eq!(oldest["requestHeaders"], "Host: localhost:1080");
        assert_eq!(oldest["responseBody"], "{\n  \"n\": 1\n}");
    }

    #[tokio::test]
    async fn test_rendered_logs_snapshot() {
        let mockserver =
            FakeMockServer::start(vec![(REQUEST_RESPONSES, StatusCode::OK, recorded(25))]).await;
        let relay = start_relay(mockserver.addr).await;

        let logs: Value = reqwest::get(format!("{}/api/logs/rendered", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let logs = logs.as_array().unwrap();
        assert_eq!(logs.len(), 25);
        assert_eq!(logs[0]["path"], "/even/24");
        assert_eq!(logs[24]["path"], "/even/0");
        assert_eq!(logs[24]["responseBody"], "{\n  \"n\": 1\n}");
        assert_eq!(mockserver.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_log_page_bad_query_is_json_400() {
        let mockserver =
            FakeMockServer::start(vec![(REQUEST_RESPONSES, StatusCode::OK, recorded(3))]).await;
        let relay = start_relay(mockserver.addr).await;

        let response = reqwest::get(format!("{}/api/logs/view?page=abc", relay))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("page"));
        assert!(mockserver.calls().is_empty());
    }

    #[tokio::test]
    async fn test_log_page_filter_and_clamp() {
        let mockserver =
            FakeMockServer::start(vec![(REQUEST_RESPONSES, StatusCode::OK, recorded(25))]).await;
        let relay = start_relay(mockserver.addr).await;

        let page: Value = reqwest::get(format!("{}/api/logs/view?filter=/odd&page=99", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(page["total"], 12);
        assert_eq!(page["page"], 2);
        for item in page["items"].as_array().unwrap() {
            assert!(item["path"].as_str().unwrap().starts_with("/odd"));
        }
    }
}
