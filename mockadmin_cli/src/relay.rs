//! HTTP client for the MockServer Admin relay

use anyhow::{Context, Result};
use mockadmin_common::{
    ExpectationDraft, ExpectationRow, ExpectationSelector, HealthReport, LogEntry,
};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Client for a running relay
#[derive(Clone)]
pub struct RelayClient {
    base_url: String,
    client: Client,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .context("Failed to build HTTP client")?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Active expectations, formatted for display
    pub async fn expectation_rows(&self) -> Result<Vec<ExpectationRow>> {
        let response = self
            .client
            .get(self.url("/api/expectations/view"))
            .send()
            .await
            .context("Failed to reach relay")?;

        let rows = check(response, "list expectations")
            .await?
            .json()
            .await
            .context("Failed to parse expectations")?;
        Ok(rows)
    }

    /// Create an expectation; returns MockServer's answer
    pub async fn create_expectation(&self, draft: &ExpectationDraft) -> Result<Value> {
        let response = self
            .client
            .post(self.url("/api/expectations"))
            .json(draft)
            .send()
            .await
            .context("Failed to reach relay")?;

        let body: Value = check(response, "create expectation")
            .await?
            .json()
            .await
            .context("Failed to parse relay response")?;
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    pub async fn delete_expectations(&self, selector: &ExpectationSelector) -> Result<()> {
        let response = self
            .client
            .delete(self.url("/api/expectations"))
            .json(selector)
            .send()
            .await
            .context("Failed to reach relay")?;

        check(response, "delete expectations").await?;
        Ok(())
    }

    pub async fn reset(&self) -> Result<()> {
        let response = self
            .client
            .delete(self.url("/api/expectations/all"))
            .send()
            .await
            .context("Failed to reach relay")?;

        check(response, "reset expectations").await?;
        Ok(())
    }

    /// All recorded requests, normalized by the relay
    pub async fn logs(&self) -> Result<Vec<LogEntry>> {
        let response = self
            .client
            .get(self.url("/api/logs"))
            .send()
            .await
            .context("Failed to reach relay")?;

        let logs = check(response, "fetch logs")
            .await?
            .json()
            .await
            .context("Failed to parse logs")?;
        Ok(logs)
    }

    pub async fn health(&self) -> Result<HealthReport> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .send()
            .await
            .context("Failed to reach relay")?;

        let report = check(response, "check health")
            .await?
            .json()
            .await
            .context("Failed to parse health report")?;
        Ok(report)
    }
}

/// Turn a relay error response into an error carrying the relay's message
async fn check(response: Response, action: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    anyhow::bail!("Failed to {}: {}", action, error_message(status, &text))
}

fn error_message(status: StatusCode, text: &str) -> String {
    let Ok(body) = serde_json::from_str::<Value>(text) else {
        return if text.is_empty() {
            status.to_string()
        } else {
            format!("{} - {}", status, text)
        };
    };

    let error = body["error"].as_str().unwrap_or("request failed");
    match &body["details"] {
        Value::Null => error.to_string(),
        Value::String(details) => format!("{} ({})", error, details),
        details => format!("{} ({})", error, details),
    }
}
