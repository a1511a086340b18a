//! Static API overview served at `/docs` and `/api`.

const ENDPOINTS: [(&str, &str, &str); 8] = [
    ("GET", "/", "Transaction form."),
    (
        "POST",
        "/analyze",
        "Form submission. Renders the page with a result or error panel.",
    ),
    (
        "POST",
        "/api/analyze",
        "JSON submission. Returns the result view and a report link.",
    ),
    (
        "GET",
        "/report/{id}",
        "Plain-text report for an analysis, while it is still held.",
    ),
    ("GET", "/health", "Service status and scorer reachability."),
    ("GET", "/metrics", "Counts of held analyses by verdict."),
    ("GET", "/docs", "This page. Also served at /api."),
    ("GET", "/openapi.json", "OpenAPI 3 document for these routes."),
];

fn endpoint_rows() -> String {
    ENDPOINTS
        .iter()
        .map(|(method, path, summary)| {
            format!(
                r#"<tr><td><code>{method} {path}</code></td><td>{summary}</td></tr>"#,
                method = method,
                path = path,
                summary = summary,
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ")
}

pub fn render() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>FraudShield | API</title>
    <style>
        *, *::before, *::after {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Inter', system-ui, sans-serif;
            background: #0b1220; color: #e5e7eb; min-height: 100vh;
        }}
        .page {{ max-width: 720px; margin: 0 auto; padding: 2.5rem 1.25rem 4rem; }}
        a {{ color: #00D4FF; }}
        .wordmark {{ font-size: 1.25rem; font-weight: 700; text-decoration: none; }}
        h1 {{ font-size: 1.125rem; margin: 1.25rem 0 0.75rem; }}
        p {{ color: #9ca3af; font-size: 0.875rem; margin-bottom: 0.75rem; }}
        table {{ width: 100%; border-collapse: collapse; font-size: 0.875rem; }}
        td {{ padding: 0.5rem; border-bottom: 1px solid #1f2a44; vertical-align: top; }}
        code, pre {{ font-family: ui-monospace, 'SF Mono', monospace; font-size: 0.8125rem; }}
        pre {{ background: #111a2e; border: 1px solid #1f2a44; border-radius: 8px; padding: 0.75rem; overflow-x: auto; margin-bottom: 0.75rem; }}
    </style>
</head>
<body>
    <div class="page">
        <a class="wordmark" href="/">FraudShield</a>
        <h1>Endpoints</h1>
        <table>
            <tbody>
                {rows}
            </tbody>
        </table>

        <h1>Scoring a transaction</h1>
        <p><code>transaction_type</code> is 0 for online, 1 for in-store and 2 for ATM.
        Amounts must be above 0 and at most 1,000,000. Distance is in km.</p>
        <pre>curl -X POST /api/analyze \
  -H 'Content-Type: application/json' \
  -d '{{"amount": 1250, "distance": 320, "transaction_type": 2}}'</pre>
        <p>Errors come back as <code>{{"error": "...", "hint": "..."}}</code>. Each submission
        route accepts 30 requests a minute and answers 429 past that.</p>
        <p>The machine-readable description is at <a href="/openapi.json">/openapi.json</a>.</p>
    </div>
</body>
</html>"#,
        rows = endpoint_rows(),
    )
}
