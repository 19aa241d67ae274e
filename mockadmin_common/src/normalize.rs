//! Flattening of MockServer's request/response log records

use crate::LogEntry;
use serde_json::{Map, Value};

/// Normalize a `REQUEST_RESPONSES` retrieval into flat log entries
///
/// The output has one entry per input element, in input order. Anything
/// other than an array yields no entries.
pub fn normalize_logs(raw: &Value) -> Vec<LogEntry> {
    match raw {
        Value::Array(items) => items.iter().map(normalize_entry).collect(),
        _ => Vec::new(),
    }
}

/// Normalize a single log record; malformed records produce defaults
pub fn normalize_entry(item: &Value) -> LogEntry {
    let Some(record) = item.as_object() else {
        return LogEntry::default();
    };

    let request = side(record, "httpRequest", "request");
    let response = side(record, "httpResponse", "response");

    LogEntry {
        timestamp: record.get("timestamp").and_then(timestamp),
        method: text(request, "method"),
        path: text(request, "path"),
        request_headers: headers(request),
        request_body: body(request),
        response_status_code: response.and_then(|r| r.get("statusCode")).and_then(status_code),
        response_headers: headers(response),
        response_body: body(response),
    }
}

/// Pick the first truthy alias for one side of the exchange
fn side<'a>(record: &'a Map<String, Value>, key: &str, alias: &str) -> Option<&'a Map<String, Value>> {
    [key, alias]
        .into_iter()
        .filter_map(|k| record.get(k))
        .find(|v| is_truthy(v))
        .and_then(Value::as_object)
}

fn text(side: Option<&Map<String, Value>>, key: &str) -> String {
    side.and_then(|s| s.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn headers(side: Option<&Map<String, Value>>) -> Value {
    side.and_then(|s| s.get("headers"))
        .filter(|v| is_truthy(v))
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

fn body(side: Option<&Map<String, Value>>) -> Option<Value> {
    side.and_then(|s| s.get("body")).filter(|v| is_truthy(v)).cloned()
}

fn timestamp(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn status_code(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// JSON truthiness as the mock-server's clients see it
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
