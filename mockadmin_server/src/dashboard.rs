//! Embedded HTML dashboard for the relay

use crate::routes::AppState;
use axum::{extract::State, response::Html};

const PAGE_SIZE_SLOT: &str = "{{LOGS_PAGE_SIZE}}";

/// Serve the HTML dashboard with the configured log page size filled in
pub async fn serve_dashboard(State(state): State<AppState>) -> Html<String> {
    Html(DASHBOARD_HTML.replace(PAGE_SIZE_SLOT, &state.config.logs_page_size.to_string()))
}

pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>MockServer Admin</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #fafafa;
            color: #333;
            font-size: 14px;
        }
        header {
            background: #fff;
            border-bottom: 1px solid #e0e0e0;
            padding: 0.75rem 1rem;
            display: flex;
            justify-content: space-between;
            align-items: center;
            position: sticky;
            top: 0;
        }
        h1 { font-size: 1.1rem; font-weight: 600; }
        h2 { font-size: 1rem; font-weight: 600; margin-bottom: 0.75rem; }
        main { max-width: 1200px; margin: 0 auto; padding: 1rem; display: grid; gap: 1rem; }
        section { background: #fff; border: 1px solid #e0e0e0; border-radius: 6px; padding: 1rem; }

        .health { display: flex; align-items: center; gap: 0.4rem; font-size: 0.85rem; color: #666; }
        .health-dot { width: 8px; height: 8px; border-radius: 50%; background: #bbb; }
        .health-dot.healthy { background: #22c55e; }
        .health-dot.unhealthy { background: #ef4444; }

        form { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 0.5rem; }
        form textarea { grid-column: 1 / -1; min-height: 4rem; font-family: monospace; }
        input, select, textarea {
            border: 1px solid #d0d0d0;
            border-radius: 4px;
            padding: 0.4rem 0.6rem;
            font-size: 0.875rem;
        }
        button {
            border: 1px solid #d0d0d0;
            background: #fff;
            border-radius: 4px;
            padding: 0.4rem 0.75rem;
            cursor: pointer;
        }
        button.primary { background: #2563eb; border-color: #2563eb; color: #fff; }
        button.danger { background: #fff; border-color: #ef4444; color: #b91c1c; }
        .toolbar { display: flex; gap: 0.5rem; align-items: center; margin-bottom: 0.75rem; }
        .toolbar .spacer { flex: 1; }

        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #eee; vertical-align: top; }
        th { font-weight: 600; background: #f5f5f5; }
        pre {
            background: #f5f5f5;
            padding: 0.5rem;
            border-radius: 4px;
            overflow-x: auto;
            font-size: 0.8rem;
            white-space: pre-wrap;
            word-break: break-all;
        }
        details { margin-top: 0.25rem; }
        summary { cursor: pointer; color: #2563eb; }
        .muted { color: #888; margin-left: 0.5rem; }
        .log-entry { padding: 0.5rem 0; border-bottom: 1px solid #eee; }
        .empty { color: #888; font-style: italic; }
    </style>
</head>
<body>
    <header>
        <h1>MockServer Admin</h1>
        <div class="health">
            <span id="health-dot" class="health-dot"></span>
            <span id="health-text">MockServer: checking...</span>
        </div>
    </header>

    <main>
        <section>
            <h2>New expectation</h2>
            <form id="create-form">
                <select name="method">
                    <option>GET</option>
                    <option>POST</option>
                    <option>PUT</option>
                    <option>PATCH</option>
                    <option>DELETE</option>
                </select>
                <input name="path" placeholder="/path" required>
                <input name="statusCode" type="number" placeholder="Status (200)">
                <textarea name="body" placeholder="Request body to match (optional)"></textarea>
                <textarea name="responseBody" placeholder="Response body ({})"></textarea>
                <button type="submit" class="primary">Create</button>
            </form>
        </section>

        <section>
            <div class="toolbar">
                <h2>Active expectations</h2>
                <span class="spacer"></span>
                <button id="refresh-exp">Refresh</button>
                <button id="reset-all" class="danger">Delete all</button>
            </div>
            <table id="exp-table">
                <thead><tr><th>Method</th><th>Path</th><th>Status</th><th>Bodies</th><th></th></tr></thead>
                <tbody></tbody>
            </table>
        </section>

        <section>
            <div class="toolbar">
                <h2>Request log</h2>
                <span class="spacer"></span>
                <input id="log-path-filter" placeholder="Filter by path prefix">
                <button id="refresh-logs">Refresh</button>
            </div>
            <div id="logs"></div>
            <div class="toolbar" style="margin-top: 0.75rem;">
                <button id="logs-prev">Previous</button>
                <button id="logs-next">Next</button>
                <span id="logs-page-info" class="muted"></span>
            </div>
        </section>
    </main>

    <script>
        const COLLAPSE_LINES = 20;
        const LOGS_PAGE_SIZE = Math.max(1, Number('{{LOGS_PAGE_SIZE}}') || 10);
        // Snapshot from the last refresh, newest first; paging never refetches
        let logsData = [];
        let currentLogsPage = 1;
        let totalLogPages = 1;

        function escapeHtml(str) {
            return String(str)
                .replace(/&/g, '&amp;')
                .replace(/</g, '&lt;')
                .replace(/>/g, '&gt;')
                .replace(/"/g, '&quot;');
        }

        function renderCollapsible(text) {
            if (!text) return '<span class="empty">(empty)</span>';
            const lines = String(text).split(/\r?\n/);
            if (lines.length <= COLLAPSE_LINES) {
                return `<pre>${escapeHtml(lines.join('\n'))}</pre>`;
            }
            const head = lines.slice(0, COLLAPSE_LINES).join('\n');
            return `
                <pre>${escapeHtml(head)}\n... (${lines.length} lines, truncated)</pre>
                <details><summary>Show all</summary><pre>${escapeHtml(lines.join('\n'))}</pre></details>
            `;
        }

        async function checkHealth() {
            const dot = document.getElementById('health-dot');
            const text = document.getElementById('health-text');
            try {
                const res = await fetch('/api/health');
                const data = await res.json();
                dot.className = 'health-dot ' + (data.ok ? 'healthy' : 'unhealthy');
                text.textContent = data.ok ? 'MockServer: healthy' : 'MockServer: unhealthy';
            } catch (e) {
                dot.className = 'health-dot unhealthy';
                text.textContent = 'MockServer: relay unreachable';
            }
        }

        async function fetchExpectations() {
            const tbody = document.querySelector('#exp-table tbody');
            const res = await fetch('/api/expectations/view');
            if (!res.ok) {
                tbody.innerHTML = '<tr><td colspan="5" class="empty">Failed to load expectations</td></tr>';
                return;
            }
            const rows = await res.json();
            if (!rows.length) {
                tbody.innerHTML = '<tr><td colspan="5" class="empty">No active expectations</td></tr>';
                return;
            }
            tbody.innerHTML = rows.map(row => `
                <tr>
                    <td>${escapeHtml(row.method)}</td>
                    <td>${escapeHtml(row.path)}</td>
                    <td>${escapeHtml(row.statusCode)}</td>
                    <td>
                        <details><summary>Request body</summary>${renderCollapsible(row.requestBody)}</details>
                        <details><summary>Response body</summary>${renderCollapsible(row.responseBody)}</details>
                    </td>
                    <td>
                        <button class="danger btn-del"
                            data-method="${escapeHtml(row.method)}"
                            data-path="${escapeHtml(row.path)}">Delete</button>
                    </td>
                </tr>
            `).join('');

            document.querySelectorAll('.btn-del').forEach(btn => {
                btn.addEventListener('click', async () => {
                    const method = btn.dataset.method;
                    const path = btn.dataset.path;
                    if (!confirm(`Delete expectations for ${method} ${path}?`)) return;
                    const res = await fetch('/api/expectations', {
                        method: 'DELETE',
                        headers: { 'Content-Type': 'application/json' },
                        body: JSON.stringify({ method, path })
                    });
                    if (!res.ok) {
                        alert('Delete failed');
                        return;
                    }
                    fetchExpectations();
                });
            });
        }

        async function fetchLogs() {
            const res = await fetch('/api/logs/rendered');
            if (!res.ok) {
                document.getElementById('logs').innerHTML = '<div class="empty">Failed to load logs</div>';
                document.getElementById('logs-page-info').textContent = '';
                return;
            }
            logsData = await res.json();
            renderLogs(1);
        }

        function renderLogs(page) {
            const container = document.getElementById('logs');
            const pageInfo = document.getElementById('logs-page-info');
            const filter = document.getElementById('log-path-filter').value.trim();

            const matching = filter ? logsData.filter(item => item.path.startsWith(filter)) : logsData;
            totalLogPages = Math.max(1, Math.ceil(matching.length / LOGS_PAGE_SIZE));
            currentLogsPage = Math.min(Math.max(1, page), totalLogPages);

            if (!matching.length) {
                container.innerHTML = '<div class="empty">No requests recorded</div>';
                pageInfo.textContent = '';
                return;
            }

            const start = (currentLogsPage - 1) * LOGS_PAGE_SIZE;
            container.innerHTML = matching.slice(start, start + LOGS_PAGE_SIZE).map(item => `
                <div class="log-entry">
                    <strong>${escapeHtml(item.method)} ${escapeHtml(item.path)}</strong>
                    ${item.timestamp ? `<span class="muted">${escapeHtml(item.timestamp)}</span>` : ''}
                    ${item.statusCode ? `<span class="muted">status: ${escapeHtml(item.statusCode)}</span>` : ''}
                    <details>
                        <summary>Full request / response</summary>
                        <strong>Request headers</strong>${renderCollapsible(item.requestHeaders)}
                        <strong>Request body</strong>${renderCollapsible(item.requestBody)}
                        <strong>Response headers</strong>${renderCollapsible(item.responseHeaders)}
                        <strong>Response body</strong>${renderCollapsible(item.responseBody)}
                    </details>
                </div>
            `).join('');
            pageInfo.textContent = `Page ${currentLogsPage} / ${totalLogPages}, ${matching.length} entries`;
        }

        document.addEventListener('DOMContentLoaded', () => {
            const form = document.getElementById('create-form');
            form.addEventListener('submit', async e => {
                e.preventDefault();
                const formData = new FormData(form);
                const payload = {
                    method: formData.get('method'),
                    path: formData.get('path'),
                    body: formData.get('body'),
                    statusCode: Number(formData.get('statusCode') || 200),
                    responseBody: formData.get('responseBody')
                };
                const res = await fetch('/api/expectations', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(payload)
                });
                if (!res.ok) {
                    const err = await res.json().catch(() => ({}));
                    alert('Create failed' + (err.error ? `: ${err.error}` : ''));
                    return;
                }
                form.reset();
                fetchExpectations();
            });

            document.getElementById('reset-all').addEventListener('click', async () => {
                if (!confirm('Delete all expectations?')) return;
                const res = await fetch('/api/expectations/all', { method: 'DELETE' });
                if (!res.ok) {
                    alert('Reset failed');
                    return;
                }
                fetchExpectations();
            });

            document.getElementById('refresh-exp').addEventListener('click', fetchExpectations);
            document.getElementById('refresh-logs').addEventListener('click', fetchLogs);
            document.getElementById('log-path-filter').addEventListener('input', () => renderLogs(1));
            document.getElementById('logs-prev').addEventListener('click', () => {
                if (currentLogsPage > 1) renderLogs(currentLogsPage - 1);
            });
            document.getElementById('logs-next').addEventListener('click', () => {
                if (currentLogsPage < totalLogPages) renderLogs(currentLogsPage + 1);
            });

            fetchExpectations();
            fetchLogs();
            checkHealth();
            setInterval(checkHealth, 5000);
        });
    </script>
</body>
</html>"#;
