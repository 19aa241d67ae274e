//! Terminal rendering of expectations, logs and health

use console::style;
use mockadmin_common::{collapse, defaults, ExpectationRow, HealthReport, LogPage, RenderedLog};

/// Expectations as a fixed-width table, optionally with their bodies
pub fn expectation_table(rows: &[ExpectationRow], with_bodies: bool) -> String {
    if rows.is_empty() {
        return "No active expectations.".to_string();
    }

    let mut out = format!("{:<8} {:<48} {:<6}\n", "METHOD", "PATH", "STATUS");
    out.push_str(&"-".repeat(64));

    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{:<8} {:<48} {:<6}",
            style(&row.method).bold(),
            truncate(&row.path, 48),
            row.status_code
        ));

        if with_bodies {
            out.push('\n');
            out.push_str(&section("Request body", &row.request_body));
            out.push('\n');
            out.push_str(&section("Response body", &row.response_body));
        }
    }

    out
}

/// One log entry: a summary line, plus headers and bodies when `full`
pub fn log_entry(log: &RenderedLog, full: bool) -> String {
    let mut out = format!("{} {}", style(&log.method).bold(), log.path);
    if !log.timestamp.is_empty() {
        out.push_str(&format!("  {}", style(&log.timestamp).dim()));
    }
    if !log.status_code.is_empty() {
        out.push_str(&format!("  status: {}", status_style(&log.status_code)));
    }

    if full {
        for (title, text) in [
            ("Request headers", &log.request_headers),
            ("Request body", &log.request_body),
            ("Response headers", &log.response_headers),
            ("Response body", &log.response_body),
        ] {
            out.push('\n');
            out.push_str(&section(title, text));
        }
    }

    out
}

/// A page of log entries with its position footer
pub fn log_page(page: &LogPage<RenderedLog>, full: bool) -> String {
    if page.total == 0 {
        return "No requests recorded.".to_string();
    }

    let mut out = page
        .items
        .iter()
        .map(|log| log_entry(log, full))
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str("\n\n");
    out.push_str(&page_footer(page));
    out
}

pub fn page_footer<T>(page: &LogPage<T>) -> String {
    format!(
        "Page {} / {}, {} entries",
        page.page, page.total_pages, page.total
    )
}

pub fn health_line(report: &HealthReport) -> String {
    if report.ok {
        return format!("{} MockServer: healthy", style("●").green());
    }

    let reason = match (&report.error, report.status) {
        (Some(error), _) => error.clone(),
        (None, Some(status)) => format!("status {}", status),
        (None, None) => "unknown".to_string(),
    };
    format!("{} MockServer: unhealthy ({})", style("●").red(), reason)
}

/// A titled, indented block collapsed to a readable number of lines
fn section(title: &str, text: &str) -> String {
    let collapsed = collapse(text, defaults::COLLAPSE_LINES);
    let body = if collapsed.is_empty() {
        style("(empty)").dim().to_string()
    } else {
        collapsed.to_string()
    };

    let indented = body
        .lines()
        .map(|line| format!("      {}", line))
        .collect::<Vec<_>>()
        .join("\n");
    format!("    {}\n{}", style(title).underlined(), indented)
}

fn status_style(code: &str) -> String {
    match code.chars().next() {
        Some('2') => style(code).green().to_string(),
        Some('4') | Some('5') => style(code).red().to_string(),
        _ => style(code).yellow().to_string(),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
