//! MockServer Admin Common - shared model for the relay and the terminal client
//!
//! This crate contains the expectation/log types exchanged with MockServer,
//! the log normalizer, and the formatting and pagination helpers used by
//! both user interfaces.

pub mod format;
pub mod normalize;
pub mod view;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use format::{collapse, format_body, format_headers, Body, Collapsed, HeaderLine, HeaderSet};
pub use normalize::{normalize_entry, normalize_logs};
pub use view::{ExpectationRow, LogPage, LogView, RenderedLog};

/// Validation errors for requests coming from the user interfaces
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("method and path are required")]
    MissingMethodOrPath,
}

/// Expectation as submitted by a user interface, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Request body the expectation should match (plain string matcher)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
}

impl ExpectationDraft {
    /// Validate the draft and build the expectation sent to MockServer
    pub fn into_expectation(self) -> Result<Expectation, ValidationError> {
        let (method, path) = require_method_and_path(self.method, self.path)?;

        // Blank matchers would only match empty bodies, so they are dropped
        let body = self
            .body
            .filter(|b| !b.trim().is_empty())
            .map(|string| BodyMatcher::String { string });

        Ok(Expectation {
            http_request: RequestMatcher { method, path, body },
            http_response: ResponseTemplate {
                status_code: self
                    .status_code
                    .filter(|code| *code != 0)
                    .unwrap_or(defaults::STATUS_CODE),
                headers: vec![Header::new(
                    "Content-Type",
                    vec![defaults::CONTENT_TYPE.to_string()],
                )],
                body: non_empty(self.response_body)
                    .unwrap_or_else(|| defaults::RESPONSE_BODY.to_string()),
            },
        })
    }
}

/// Method + path pair identifying expectations to delete
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectationSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ExpectationSelector {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            path: Some(path.into()),
        }
    }

    /// Validate the selector and build the matcher for MockServer's clear call
    pub fn into_clear_criteria(self) -> Result<ClearCriteria, ValidationError> {
        let (method, path) = require_method_and_path(self.method, self.path)?;
        Ok(ClearCriteria {
            http_request: RequestMatcher {
                method,
                path,
                body: None,
            },
        })
    }
}

fn require_method_and_path(
    method: Option<String>,
    path: Option<String>,
) -> Result<(String, String), ValidationError> {
    match (non_empty(method), non_empty(path)) {
        (Some(method), Some(path)) => Ok((method.to_uppercase(), path)),
        _ => Err(ValidationError::MissingMethodOrPath),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Expectation in MockServer's wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectation {
    pub http_request: RequestMatcher,
    pub http_response: ResponseTemplate,
}

/// Request side of an expectation, also used as a clear matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMatcher {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyMatcher>,
}

/// Body matcher attached to a request matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyMatcher {
    #[serde(rename = "STRING")]
    String { string: String },
}

/// Canned response returned by MockServer when an expectation matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTemplate {
    pub status_code: u16,
    pub headers: Vec<Header>,
    pub body: String,
}

/// Header in MockServer's list form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub values: Vec<String>,
}

impl Header {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Matcher body for MockServer's clear call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCriteria {
    pub http_request: RequestMatcher,
}

/// Flat request/response log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: Option<String>,
    pub method: String,
    pub path: String,
    pub request_headers: Value,
    pub request_body: Option<Value>,
    pub response_status_code: Option<u16>,
    pub response_headers: Value,
    pub response_body: Option<Value>,
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            timestamp: None,
            method: String::new(),
            path: String::new(),
            request_headers: Value::Object(Default::default()),
            request_body: None,
            response_status_code: None,
            response_headers: Value::Object(Default::default()),
            response_body: None,
        }
    }
}

/// Result of probing MockServer's status endpoint
///
/// `status` and `data` are present when MockServer answered, `error` when it
/// could not be reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// MockServer answered; only a 200 counts as healthy
    pub fn answered(status: u16, data: Value) -> Self {
        Self {
            ok: status == 200,
            status: Some(status),
            data: Some(data),
            error: None,
        }
    }

    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Defaults applied to new expectations and views
pub mod defaults {
    /// Status code used when a draft does not specify one
    pub const STATUS_CODE: u16 = 200;

    /// Response body used when a draft does not specify one
    pub const RESPONSE_BODY: &str = "{}";

    /// Content type attached to every created expectation's response
    pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

    /// Log entries per page
    pub const PAGE_SIZE: usize = 10;

    /// Lines shown before a body is collapsed
    pub const COLLAPSE_LINES: usize = 20;
}
