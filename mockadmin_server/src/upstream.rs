//! Client for MockServer's admin REST API
//!
//! Every admin call is a `PUT` with a JSON body. Non-2xx answers are turned
//! into [`UpstreamError::Status`] carrying whatever MockServer said.

use mockadmin_common::{ClearCriteria, Expectation};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Failure talking to MockServer
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("MockServer request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("MockServer returned {status}")]
    Status { status: StatusCode, body: String },
}

impl UpstreamError {
    /// Detail to hand back to the caller: MockServer's answer if it gave one
    pub fn details(&self) -> Value {
        match self {
            UpstreamError::Transport(e) => Value::String(e.to_string()),
            UpstreamError::Status { status, body } if body.is_empty() => {
                Value::String(status.to_string())
            }
            UpstreamError::Status { body, .. } => parse_body(body),
        }
    }
}

/// Client for a single MockServer instance
#[derive(Clone)]
pub struct MockServerClient {
    base_url: String,
    client: Client,
}

impl MockServerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url: base_url.into(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Active expectations, unfiltered
    pub async fn retrieve_active_expectations(&self) -> Result<Value, UpstreamError> {
        let (_, data) = self
            .put("/mockserver/retrieve?type=ACTIVE_EXPECTATIONS&format=JSON", &json!({}))
            .await?;
        Ok(data)
    }

    /// Register an expectation; returns MockServer's answer
    pub async fn add_expectation(&self, expectation: &Expectation) -> Result<Value, UpstreamError> {
        let (_, data) = self.put("/mockserver/expectation", expectation).await?;
        Ok(data)
    }

    /// Remove expectations and logs matching `criteria`
    pub async fn clear(&self, criteria: &ClearCriteria) -> Result<(), UpstreamError> {
        self.put("/mockserver/clear", criteria).await?;
        Ok(())
    }

    /// Remove all expectations and logs
    pub async fn reset(&self) -> Result<(), UpstreamError> {
        self.put("/mockserver/reset", &json!({})).await?;
        Ok(())
    }

    /// Recorded request/response pairs, unfiltered
    pub async fn retrieve_request_responses(&self) -> Result<Value, UpstreamError> {
        let (_, data) = self
            .put("/mockserver/retrieve?type=REQUEST_RESPONSES&format=JSON", &json!({}))
            .await?;
        Ok(data)
    }

    /// Probe MockServer's status endpoint
    pub async fn status(&self) -> Result<(StatusCode, Value), UpstreamError> {
        self.put("/mockserver/status", &json!({})).await
    }

    async fn put<B: Serialize + ?Sized>(
        &self,
        path_and_query: &str,
        body: &B,
    ) -> Result<(StatusCode, Value), UpstreamError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        tracing::debug!("PUT {}", url);

        let response = self.client.put(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body: text });
        }

        Ok((status, parse_body(&text)))
    }
}

/// Parse a response body as JSON, keeping non-JSON text as a string
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
        assert_eq!(parse_body("[1,2]"), json!([1, 2]));
        assert_eq!(parse_body("not json"), json!("not json"));
    }

    #[test]
    fn test_status_error_details() {
        let with_body = UpstreamError::Status {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"message":"incorrect expectation json format"}"#.to_string(),
        };
        assert_eq!(
            with_body.details(),
            json!({ "message": "incorrect expectation json format" })
        );

        let empty = UpstreamError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert_eq!(empty.details(), json!("404 Not Found"));
        assert_eq!(empty.to_string(), "MockServer returned 404 Not Found");
    }
}
