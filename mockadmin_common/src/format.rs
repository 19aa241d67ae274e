//! Human-readable rendering of MockServer bodies and headers
//!
//! MockServer reports bodies and headers in several shapes depending on where
//! they come from (recorded requests, expectations, responses). Both are
//! decoded into a tagged representation first and rendered from there, so
//! formatting never fails on unexpected input.

use crate::normalize::is_truthy;
use serde_json::Value;
use std::fmt;

/// A body as reported by MockServer
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A bare string body
    Plain(String),
    /// `{"type": "STRING", "string": "..."}`
    StringMatch(String),
    /// `{"type": "JSON", "value": ...}`; the value may itself be encoded JSON text
    Json(Value),
    /// Any other shape
    Other(Value),
}

impl Body {
    /// Decode a raw body; empty values (null, `""`, `false`, `0`) have no body
    pub fn decode(value: &Value) -> Option<Body> {
        if !is_truthy(value) {
            return None;
        }

        let body = match value {
            Value::String(s) => Body::Plain(s.clone()),
            Value::Object(map) => match map.get("type").and_then(Value::as_str) {
                Some("STRING") => match map.get("string") {
                    Some(Value::String(s)) => Body::StringMatch(s.clone()),
                    _ => Body::Other(value.clone()),
                },
                // Recorded requests carry the payload under `json` rather than `value`
                Some("JSON") => match ["value", "json"]
                    .into_iter()
                    .filter_map(|k| map.get(k))
                    .find(|v| is_truthy(v))
                {
                    Some(inner) => Body::Json(inner.clone()),
                    None => Body::Other(value.clone()),
                },
                _ => Body::Other(value.clone()),
            },
            other => Body::Other(other.clone()),
        };

        Some(body)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Plain(s) | Body::StringMatch(s) => f.write_str(s),
            Body::Json(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
                Ok(parsed) => f.write_str(&pretty(&parsed)),
                Err(_) => f.write_str(encoded),
            },
            Body::Json(value) | Body::Other(value) => f.write_str(&pretty(value)),
        }
    }
}

/// Format a raw body for display; never fails
pub fn format_body(value: &Value) -> String {
    Body::decode(value)
        .map(|body| body.to_string())
        .unwrap_or_default()
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// One `name: v1, v2` header line
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLine {
    pub name: String,
    pub values: Vec<String>,
}

/// Headers as reported by MockServer
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderSet {
    /// Decoded from `{name: [values]}` or `[{name, values}]`
    Lines(Vec<HeaderLine>),
    /// Unrecognized shape, coerced to text
    Raw(String),
}

impl HeaderSet {
    pub fn decode(value: &Value) -> HeaderSet {
        if !is_truthy(value) {
            return HeaderSet::Lines(Vec::new());
        }

        match value {
            Value::Object(map) => HeaderSet::Lines(
                map.iter()
                    .map(|(name, values)| HeaderLine {
                        name: name.clone(),
                        values: match values {
                            Value::Array(items) => items.iter().map(list_item_text).collect(),
                            other => vec![coerce_text(other)],
                        },
                    })
                    .collect(),
            ),
            Value::Array(items) => HeaderSet::Lines(
                items
                    .iter()
                    .map(|header| HeaderLine {
                        name: header
                            .get("name")
                            .map(coerce_text)
                            .unwrap_or_default(),
                        values: match header.get("values") {
                            Some(Value::Array(values)) => values.iter().map(list_item_text).collect(),
                            Some(v) if is_truthy(v) => vec![coerce_text(v)],
                            _ => Vec::new(),
                        },
                    })
                    .collect(),
            ),
            other => HeaderSet::Raw(coerce_text(other)),
        }
    }
}

impl fmt::Display for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderSet::Lines(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}: {}", line.name, line.values.join(", "))?;
                }
                Ok(())
            }
            HeaderSet::Raw(text) => f.write_str(text),
        }
    }
}

/// Format raw headers as newline-separated `name: v1, v2` lines
pub fn format_headers(value: &Value) -> String {
    HeaderSet::decode(value).to_string()
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text of a list element; nulls render as nothing
fn list_item_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => coerce_text(other),
    }
}

/// A text cut down to its first lines for compact display
#[derive(Debug, Clone, PartialEq)]
pub struct Collapsed {
    pub head: String,
    pub full: String,
    pub total_lines: usize,
    pub truncated: bool,
}

impl Collapsed {
    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }
}

impl fmt::Display for Collapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.truncated {
            write!(
                f,
                "{}\n... ({} lines, truncated)",
                self.head, self.total_lines
            )
        } else {
            f.write_str(&self.full)
        }
    }
}

/// Keep at most `max_lines` lines of `text`, remembering the full version
pub fn collapse(text: &str, max_lines: usize) -> Collapsed {
    let lines: Vec<&str> = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    let full = lines.join("\n");

    if text.is_empty() || lines.len() <= max_lines {
        return Collapsed {
            head: full.clone(),
            total_lines: if text.is_empty() { 0 } else { lines.len() },
            full,
            truncated: false,
        };
    }

    Collapsed {
        head: lines[..max_lines].join("\n"),
        full,
        total_lines: lines.len(),
        truncated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_body_shapes() {
        assert_eq!(
            format_body(&json!({ "type": "JSON", "value": "{\"a\":1}" })),
            "{\n  \"a\": 1\n}"
        );
        assert_eq!(format_body(&json!("plain")), "plain");
        assert_eq!(format_body(&Value::Null), "");
    }

    #[test]
    fn test_format_body_empty_values() {
        assert_eq!(format_body(&json!("")), "");
        assert_eq!(format_body(&json!(false)), "");
        assert_eq!(format_body(&json!(0)), "");
    }

    #[test]
    fn test_string_matcher_is_verbatim() {
        let raw = json!({ "type": "STRING", "string": "{\"not\":\"pretty\"}" });
        assert_eq!(Body::decode(&raw), Some(Body::StringMatch("{\"not\":\"pretty\"}".into())));
        assert_eq!(format_body(&raw), "{\"not\":\"pretty\"}");
    }

    #[test]
    fn test_json_value_unparseable_is_verbatim() {
        let raw = json!({ "type": "JSON", "value": "{broken" });
        assert_eq!(format_body(&raw), "{broken");
    }

    #[test]
    fn test_json_structured_value_is_pretty() {
        let raw = json!({ "type": "JSON", "value": { "b": [1, 2] } });
        assert_eq!(format_body(&raw), "{\n  \"b\": [\n    1,\n    2\n  ]\n}");

        let recorded = json!({ "type": "JSON", "json": { "id": 7 } });
        assert_eq!(format_body(&recorded), "{\n  \"id\": 7\n}");
    }

    #[test]
    fn test_unknown_body_shape_falls_back_to_json() {
        let raw = json!({ "type": "BINARY", "base64Bytes": "AAE=" });
        assert!(matches!(Body::decode(&raw), Some(Body::Other(_))));
        assert_eq!(
            format_body(&raw),
            "{\n  \"type\": \"BINARY\",\n  \"base64Bytes\": \"AAE=\"\n}"
        );
        assert_eq!(format_body(&json!(12)), "12");
        assert_eq!(format_body(&json!(true)), "true");
    }

    #[test]
    fn test_json_without_value_is_other() {
        let raw = json!({ "type": "JSON", "value": "" });
        assert!(matches!(Body::decode(&raw), Some(Body::Other(_))));
    }

    #[test]
    fn test_format_headers_map() {
        assert_eq!(format_headers(&json!({ "X-A": ["1", "2"] })), "X-A: 1, 2");
        assert_eq!(
            format_headers(&json!({ "Host": ["localhost"], "Accept": "*/*" })),
            "Host: localhost\nAccept: */*"
        );
    }

    #[test]
    fn test_format_headers_list() {
        assert_eq!(format_headers(&json!([{ "name": "X-A", "values": ["1"] }])), "X-A: 1");
        assert_eq!(
            format_headers(&json!([
                { "name": "A", "values": ["x", "y"] },
                { "name": "B" }
            ])),
            "A: x, y\nB: "
        );
    }

    #[test]
    fn test_format_headers_fallbacks() {
        assert_eq!(format_headers(&Value::Null), "");
        assert_eq!(format_headers(&json!({})), "");
        assert_eq!(format_headers(&json!("Raw: header")), "Raw: header");
        assert_eq!(format_headers(&json!(7)), "7");
    }

    #[test]
    fn test_collapse_short_text() {
        let collapsed = collapse("a\nb", 20);
        assert!(!collapsed.truncated);
        assert_eq!(collapsed.total_lines, 2);
        assert_eq!(collapsed.to_string(), "a\nb");

        assert!(collapse("", 20).is_empty());
    }

    #[test]
    fn test_collapse_long_text() {
        let text = (1..=25).map(|n| n.to_string()).collect::<Vec<_>>().join("\r\n");
        let collapsed = collapse(&text, 20);

        assert!(collapsed.truncated);
        assert_eq!(collapsed.total_lines, 25);
        assert_eq!(collapsed.head.lines().count(), 20);
        assert!(collapsed.to_string().ends_with("... (25 lines, truncated)"));
        assert!(!collapsed.full.contains('\r'));
    }
}
