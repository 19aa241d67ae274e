//! Log pagination/filtering state and display rows

use crate::defaults;
use crate::format::{format_body, format_headers};
use crate::LogEntry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// One page of a filtered, sorted log set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage<T> {
    pub items: Vec<T>,
    /// Page number after clamping (1-indexed)
    pub page: usize,
    pub total_pages: usize,
    /// Number of entries matching the filter
    pub total: usize,
}

impl<T> LogPage<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> LogPage<U> {
        LogPage {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total: self.total,
        }
    }
}

/// Fetched log entries plus the user's filter and page cursor
#[derive(Debug, Clone)]
pub struct LogView {
    entries: Vec<LogEntry>,
    filter: String,
    page: usize,
    page_size: usize,
}

impl LogView {
    pub fn new(entries: Vec<LogEntry>, page_size: usize) -> Self {
        Self {
            entries,
            filter: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the log set, keeping the filter and returning to page 1
    pub fn set_entries(&mut self, entries: Vec<LogEntry>) {
        self.entries = entries;
        self.page = 1;
    }

    /// Change the path-prefix filter and return to page 1
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.trim().to_string();
        self.page = 1;
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Move to `page`, clamped to the pages available under the current filter
    pub fn go_to(&mut self, page: usize) {
        self.page = self.current_page_for(page);
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// The page under the current filter and cursor
    pub fn current(&self) -> LogPage<&LogEntry> {
        self.view(&self.filter, self.page)
    }

    /// Filter by path prefix, sort newest first, and slice out `page`
    ///
    /// `page` is clamped to `[1, max(1, ceil(total / page_size))]`.
    pub fn view(&self, filter: &str, page: usize) -> LogPage<&LogEntry> {
        let matching = self.filtered_sorted(filter);
        let total = matching.len();
        let total_pages = total_pages(total, self.page_size);
        let page = page.clamp(1, total_pages);

        let items = matching
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        LogPage {
            items,
            page,
            total_pages,
            total,
        }
    }

    fn current_page_for(&self, page: usize) -> usize {
        let total = self.filtered_sorted(&self.filter).len();
        page.clamp(1, total_pages(total, self.page_size))
    }

    /// Every entry matching `filter`, newest first
    pub fn filtered_sorted(&self, filter: &str) -> Vec<&LogEntry> {
        let mut matching: Vec<&LogEntry> = self
            .entries
            .iter()
            .filter(|entry| filter.is_empty() || entry.path.starts_with(filter))
            .collect();

        // sort_by is stable, so entries with equal timestamps keep their order
        matching.sort_by(|a, b| newest_first(timestamp_of(a), timestamp_of(b)));
        matching
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new(Vec::new(), defaults::PAGE_SIZE)
    }
}

fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

fn timestamp_of(entry: &LogEntry) -> Option<&str> {
    entry.timestamp.as_deref().filter(|t| !t.is_empty())
}

/// Descending by timestamp; entries without one go last
///
/// Two numeric timestamps (epoch millis) compare as numbers, anything else
/// compares as text.
fn newest_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(a), Ok(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
            _ => b.cmp(a),
        },
    }
}

/// A log entry with every field rendered to display text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedLog {
    pub method: String,
    pub path: String,
    pub timestamp: String,
    pub status_code: String,
    pub request_headers: String,
    pub request_body: String,
    pub response_headers: String,
    pub response_body: String,
}

impl From<&LogEntry> for RenderedLog {
    fn from(entry: &LogEntry) -> Self {
        Self {
            method: entry.method.clone(),
            path: entry.path.clone(),
            timestamp: entry.timestamp.clone().unwrap_or_default(),
            status_code: entry
                .response_status_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
            request_headers: format_headers(&entry.request_headers),
            request_body: entry.request_body.as_ref().map(format_body).unwrap_or_default(),
            response_headers: format_headers(&entry.response_headers),
            response_body: entry.response_body.as_ref().map(format_body).unwrap_or_default(),
        }
    }
}

/// An active expectation shaped for the expectations table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationRow {
    pub method: String,
    pub path: String,
    pub status_code: String,
    pub request_body: String,
    pub response_body: String,
}

impl ExpectationRow {
    /// Build a row from an expectation as MockServer returns it
    pub fn from_raw(raw: &Value) -> Self {
        let request = raw.get("httpRequest");
        let response = raw.get("httpResponse");
        let field = |side: Option<&Value>, key: &str| side.and_then(|s| s.get(key)).cloned();

        Self {
            method: text(field(request, "method")),
            path: text(field(request, "path")),
            status_code: text(field(response, "statusCode")),
            request_body: field(request, "body").map(|b| format_body(&b)).unwrap_or_default(),
            response_body: field(response, "body").map(|b| format_body(&b)).unwrap_or_default(),
        }
    }

    /// Rows for an `ACTIVE_EXPECTATIONS` retrieval; non-arrays have none
    pub fn rows(raw: &Value) -> Vec<Self> {
        raw.as_array()
            .map(|items| items.iter().map(Self::from_raw).collect())
            .unwrap_or_default()
    }
}

fn text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(path: &str, timestamp: Option<&str>) -> LogEntry {
        LogEntry {
            path: path.to_string(),
            method: "GET".to_string(),
            timestamp: timestamp.map(str::to_string),
            ..Default::default()
        }
    }

    fn twenty_five() -> Vec<LogEntry> {
        (0..25)
            .map(|i| entry(&format!("/item/{}", i), Some(&format!("2024-01-01T00:00:{:02}.000Z", i))))
            .collect()
    }

    #[test]
    fn test_page_sizes_and_clamping() {
        let view = LogView::new(twenty_five(), 10);

        let first = view.view("", 1);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages, 3);

        assert_eq!(view.view("", 3).items.len(), 5);

        let clamped = view.view("", 99);
        assert_eq!(clamped.page, 3);
        assert_eq!(clamped.items.len(), 5);

        assert_eq!(view.view("", 0).page, 1);
    }

    #[test]
    fn test_empty_view_has_one_page() {
        let view = LogView::default();
        let page = view.view("", 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_prefix_filter() {
        let view = LogView::new(
            vec![
                entry("/foo", Some("3")),
                entry("/bar/foo", Some("2")),
                entry("/foobar", Some("1")),
                entry("/foo/1", None),
            ],
            10,
        );

        let page = view.view("/foo", 1);
        let paths: Vec<&str> = page.items.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/foo", "/foobar", "/foo/1"]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_sorted_newest_first_with_missing_last() {
        let view = LogView::new(
            vec![
                entry("/a", None),
                entry("/b", Some("2024-01-01T00:00:01Z")),
                entry("/c", Some("")),
                entry("/d", Some("2024-01-01T00:00:03Z")),
                entry("/e", Some("2024-01-01T00:00:02Z")),
            ],
            10,
        );

        let page = view.view("", 1);
        let paths: Vec<&str> = page.items.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/d", "/e", "/b", "/a", "/c"]);
    }

    #[test]
    fn test_numeric_timestamps_sort_as_numbers() {
        let raw = json!([
            { "timestamp": 9, "httpRequest": { "path": "/nine" } },
            { "timestamp": 10, "httpRequest": { "path": "/ten" } },
            { "timestamp": 1700000000000u64, "httpRequest": { "path": "/epoch" } },
            { "httpRequest": { "path": "/untimed" } }
        ]);
        let view = LogView::new(crate::normalize_logs(&raw), 10);

        let page = view.view("", 1);
        let paths: Vec<&str> = page.items.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/epoch", "/ten", "/nine", "/untimed"]);
    }

    #[test]
    fn test_filtered_sorted_spans_all_pages() {
        let view = LogView::new(twenty_five(), 10);
        let all = view.filtered_sorted("");
        assert_eq!(all.len(), 25);
        assert_eq!(all[0].path, "/item/24");
        assert_eq!(all[24].path, "/item/0");

        assert_eq!(view.filtered_sorted("/item/2").len(), 6);
    }

    #[test]
    fn test_first_page_holds_newest_entries() {
        let view = LogView::new(twenty_five(), 10);
        let page = view.view("", 1);
        assert_eq!(page.items[0].path, "/item/24");
        assert_eq!(page.items[9].path, "/item/15");

        let last = view.view("", 3);
        assert_eq!(last.items[4].path, "/item/0");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = LogView::new(twenty_five(), 10);
        view.go_to(3);
        assert_eq!(view.page(), 3);

        view.set_filter("  /item/1 ");
        assert_eq!(view.filter(), "/item/1");
        assert_eq!(view.page(), 1);

        let page = view.current();
        // "/item/1" and "/item/10" through "/item/19"
        assert_eq!(page.total, 11);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        let mut view = LogView::new(twenty_five(), 10);
        view.prev_page();
        assert_eq!(view.page(), 1);

        view.next_page();
        view.next_page();
        view.next_page();
        assert_eq!(view.page(), 3);

        view.go_to(50);
        assert_eq!(view.page(), 3);

        view.set_entries(twenty_five());
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_rendered_log() {
        let log = LogEntry {
            timestamp: Some("2024-01-01T00:00:00Z".to_string()),
            method: "POST".to_string(),
            path: "/x".to_string(),
            request_headers: json!({ "X-A": ["1", "2"] }),
            request_body: Some(json!({ "type": "JSON", "value": "{\"a\":1}" })),
            response_status_code: Some(201),
            response_headers: json!([{ "name": "X-B", "values": ["3"] }]),
            response_body: None,
        };

        let rendered = RenderedLog::from(&log);
        assert_eq!(rendered.status_code, "201");
        assert_eq!(rendered.request_headers, "X-A: 1, 2");
        assert_eq!(rendered.request_body, "{\n  \"a\": 1\n}");
        assert_eq!(rendered.response_headers, "X-B: 3");
        assert_eq!(rendered.response_body, "");
    }

    #[test]
    fn test_page_map_keeps_counts() {
        let view = LogView::new(twenty_five(), 10);
        let rendered = view.view("", 2).map(RenderedLog::from);
        assert_eq!(rendered.page, 2);
        assert_eq!(rendered.total, 25);
        assert_eq!(rendered.items.len(), 10);
    }

    #[test]
    fn test_expectation_rows() {
        let raw = json!([
            {
                "id": "abc",
                "httpRequest": { "method": "GET", "path": "/users", "body": { "type": "STRING", "string": "q" } },
                "httpResponse": { "statusCode": 200, "body": "{\"users\":[]}" }
            },
            { "httpRequest": { "path": "/partial" } }
        ]);

        let rows = ExpectationRow::rows(&raw);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].method, "GET");
        assert_eq!(rows[0].status_code, "200");
        assert_eq!(rows[0].request_body, "q");
        assert_eq!(rows[0].response_body, "{\"users\":[]}");
        assert_eq!(rows[1].method, "");
        assert_eq!(rows[1].status_code, "");

        assert!(ExpectationRow::rows(&json!({ "not": "a list" })).is_empty());
    }
}
