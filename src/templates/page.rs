use v_htmlescape::escape;

use crate::transaction::{distance_fill_percent, TransactionForm, TransactionType};
use crate::view::{ErrorView, Meter, Panel, ParticleBurst, ResultView};

pub struct PageModel<'a> {
    pub form: &'a TransactionForm,
    pub panel: &'a Panel,
    pub report_url: Option<&'a str>,
}

fn method_cards(form: &TransactionForm) -> String {
    let selected = form.selected_method();
    let mut cards = String::new();
    for ty in TransactionType::ALL {
        let icon = match ty {
            TransactionType::Online => "🛒",
            TransactionType::InStore => "🏬",
            TransactionType::Atm => "🏧",
        };
        let checked = if selected == Some(ty) { " checked" } else { "" };
        cards.push_str(&format!(
            r#"<label class="radio-card">
                        <input type="radio" name="transaction_type" value="{value}"{checked}>
                        <span class="radio-icon">{icon}</span>
                        <span class="radio-label">{label}</span>
                    </label>"#,
            value = ty.wire(),
            checked = checked,
            icon = icon,
            label = ty.label(),
        ));
    }
    cards
}

fn meter_row(label: &str, meter: &Meter, bar_class: &str, delay_ms: u32) -> String {
    format!(
        r#"<div class="metric">
                    <div class="metric-head"><span>{label}</span><span class="metric-value">{text}</span></div>
                    <div class="bar"><div class="bar-fill {bar_class}" style="--w:{width:.1}%; animation-delay:{delay_ms}ms"></div></div>
                </div>"#,
        label = label,
        text = meter.text,
        bar_class = bar_class,
        width = meter.width,
        delay_ms = delay_ms,
    )
}

fn particles(burst: &ParticleBurst) -> String {
    burst
        .particles
        .iter()
        .map(|p| {
            let (dx, dy) = p.offset();
            format!(
                r#"<div class="particle" style="background:{color}; --dx:{dx:.1}px; --dy:{dy:.1}px; animation-duration:{dur}ms; animation-delay:{delay}ms"></div>"#,
                color = p.color,
                dx = dx,
                dy = dy,
                dur = p.duration_ms,
                delay = p.delay_ms,
            )
        })
        .collect()
}

fn result_panel(view: &ResultView, report_url: Option<&str>) -> String {
    let actions = match report_url {
        Some(url) => format!(
            r#"<div class="result-actions">
                <a class="btn" href="{url}" download>Download report</a>
                <a class="btn secondary" href="/">New analysis</a>
            </div>"#,
            url = url,
        ),
        None => String::new(),
    };
    let burst = view.celebration.as_ref().map(particles).unwrap_or_default();

    format!(
        r#"<section class="result" id="resultSection" role="status">
            <div class="result-icon {tone}">{icon}</div>
            <h2 class="result-title" style="color:{color}">{title}</h2>
            <p class="result-message">{message}</p>
            <div class="result-metrics">
                {confidence}
                {fraud}
                {safe}
            </div>
            {actions}
        </section>
        {burst}"#,
        tone = view.tone.css_class(),
        icon = view.icon,
        color = view.tone.color_var(),
        title = view.title,
        message = view.message,
        confidence = meter_row("Confidence", &view.confidence, "confidence", 100),
        fraud = meter_row("Fraud probability", &view.fraud, "fraud", 300),
        safe = meter_row("Legitimate probability", &view.safe, "safe", 300),
        actions = actions,
        burst = burst,
    )
}

fn error_panel(view: &ErrorView) -> String {
    format!(
        r#"<section class="result" id="resultSection" role="alert">
            <div class="result-icon {tone}">{icon}</div>
            <h2 class="result-title" style="color:{color}">{title}</h2>
            <p class="result-message">{message}</p>
        </section>"#,
        tone = view.tone.css_class(),
        icon = view.icon,
        color = view.tone.color_var(),
        title = view.title,
        message = escape(&view.message),
    )
}

pub fn render(page: &PageModel<'_>) -> String {
    let panel = match page.panel {
        Panel::Empty => String::new(),
        Panel::Result(view) => result_panel(view, page.report_url),
        Panel::Error(view) => error_panel(view),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>FraudShield | transaction check</title>
    <style>
        *, *::before, *::after {{ margin: 0; padding: 0; box-sizing: border-box; }}

        :root {{
            --bg: #0b1220;
            --panel: #111a2e;
            --border: #1f2a44;
            --text-primary: #e5e7eb;
            --text-secondary: #9ca3af;
            --accent: #00D4FF;
            --accent-strong: #0066FF;
            --success: #10B981;
            --danger: #EF4444;
        }}

        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Inter', system-ui, sans-serif;
            background: var(--bg); color: var(--text-primary); min-height: 100vh;
            -webkit-font-smoothing: antialiased;
        }}

        .page {{ max-width: 560px; margin: 0 auto; padding: 2.5rem 1.25rem 4rem; }}
        .wordmark {{ font-size: 1.25rem; font-weight: 700; color: var(--accent); text-decoration: none; }}
        .page-foot {{ text-align: center; font-size: 0.75rem; margin-top: 1.5rem; }}
        .page-foot a {{ color: var(--text-secondary); }}
        .tagline {{ color: var(--text-secondary); font-size: 0.875rem; margin: 0.25rem 0 1.5rem; }}

        form, .result {{
            background: var(--panel); border: 1px solid var(--border); border-radius: 12px;
            padding: 1.25rem; margin-bottom: 1rem;
        }}
        .field {{ margin-bottom: 1rem; }}
        .field label {{ display: block; font-size: 0.8125rem; color: var(--text-secondary); margin-bottom: 0.375rem; }}
        .field input[type=number] {{
            width: 100%; padding: 0.625rem 0.75rem; border-radius: 8px; border: 1px solid var(--border);
            background: var(--bg); color: var(--text-primary); font-size: 1rem;
            transition: transform 0.15s;
        }}
        .field input[type=number]:focus {{ transform: scale(1.01); outline: 1px solid var(--accent); }}

        .distance-track {{ height: 4px; background: var(--border); border-radius: 2px; margin-top: 0.5rem; overflow: hidden; }}
        .distance-fill {{ height: 100%; background: linear-gradient(90deg, var(--success), var(--danger)); transition: width 0.2s; }}

        .radio-grid {{ display: grid; grid-template-columns: repeat(3, 1fr); gap: 0.5rem; }}
        .radio-card {{
            display: flex; flex-direction: column; align-items: center; gap: 0.25rem;
            padding: 0.75rem 0.5rem; border: 1px solid var(--border); border-radius: 8px; cursor: pointer;
        }}
        .radio-card input {{ position: absolute; opacity: 0; }}
        .radio-card:has(input:checked) {{ border-color: var(--accent); background: rgba(0, 212, 255, 0.08); }}
        .radio-label {{ font-size: 0.75rem; color: var(--text-secondary); text-align: center; }}

        .submit {{
            width: 100%; padding: 0.75rem; border: none; border-radius: 8px; font-size: 1rem; font-weight: 600;
            color: #fff; background: linear-gradient(90deg, var(--accent-strong), var(--accent)); cursor: pointer;
        }}

        .result-icon {{ font-size: 2.5rem; text-align: center; }}
        .result-title {{ text-align: center; font-size: 1.25rem; margin-top: 0.5rem; }}
        .result-message {{ text-align: center; color: var(--text-secondary); font-size: 0.875rem; margin: 0.5rem 0 1rem; }}
        .result-metrics {{ display: flex; flex-direction: column; gap: 0.75rem; }}
        .metric-head {{ display: flex; justify-content: space-between; font-size: 0.8125rem; color: var(--text-secondary); }}
        .metric-value {{ color: var(--text-primary); font-weight: 600; }}
        .bar {{ height: 8px; background: var(--border); border-radius: 4px; overflow: hidden; margin-top: 0.25rem; }}
        .bar-fill {{ height: 100%; width: 0; animation: grow 0.8s ease-out forwards; }}
        .bar-fill.confidence {{ background: var(--accent); }}
        .bar-fill.fraud {{ background: var(--danger); }}
        .bar-fill.safe {{ background: var(--success); }}
        @keyframes grow {{ to {{ width: var(--w); }} }}

        .result-actions {{ display: grid; grid-template-columns: 1fr 1fr; gap: 0.5rem; margin-top: 1.25rem; }}
        .btn {{
            display: block; text-align: center; padding: 0.625rem; border-radius: 8px; font-size: 0.875rem;
            color: #fff; background: var(--accent-strong); text-decoration: none;
        }}
        .btn.secondary {{ background: transparent; border: 1px solid var(--border); color: var(--text-secondary); }}

        .particle {{
            position: fixed; width: 8px; height: 8px; border-radius: 50%; pointer-events: none;
            z-index: 9999; left: 50%; top: 50%; opacity: 0;
            animation-name: burst; animation-timing-function: cubic-bezier(0.4, 0, 0.2, 1); animation-fill-mode: both;
        }}
        @keyframes burst {{
            from {{ transform: translate(0, 0) scale(1); opacity: 1; }}
            to {{ transform: translate(var(--dx), var(--dy)) scale(0); opacity: 0; }}
        }}
    </style>
</head>
<body>
    <div class="page">
        <a class="wordmark" href="/">FraudShield</a>
        <p class="tagline">Check a card transaction against the fraud scoring service.</p>

        <form id="fraudForm" method="post" action="/analyze" novalidate>
            <div class="field">
                <label for="amount">Transaction amount ($)</label>
                <input type="number" id="amount" name="amount" min="0" step="0.01" value="{amount}" placeholder="0.00">
            </div>
            <div class="field">
                <label for="distance">Distance from home (km)</label>
                <input type="number" id="distance" name="distance" min="0" step="0.1" value="{distance}" placeholder="0"
                    oninput="document.getElementById('distanceFill').style.width = Math.min(Math.max(parseFloat(this.value) || 0, 0) / 5, 100) + '%'">
                <div class="distance-track"><div class="distance-fill" id="distanceFill" style="width:{distance_fill:.1}%"></div></div>
            </div>
            <div class="field">
                <label>Transaction method</label>
                <div class="radio-grid">
                    {method_cards}
                </div>
            </div>
            <button class="submit" id="submitBtn" type="submit">Analyze transaction</button>
        </form>

        {panel}

        <p class="page-foot"><a href="/docs">API docs</a></p>
    </div>
</body>
</html>"#,
        amount = escape(&page.form.amount),
        distance = escape(&page.form.distance),
        distance_fill = distance_fill_percent(&page.form.distance),
        method_cards = method_cards(page.form),
        panel = panel,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::PredictResponse;

    fn form(amount: &str, method: Option<&str>) -> TransactionForm {
        TransactionForm {
            amount: amount.to_string(),
            distance: "250".to_string(),
            transaction_type: method.map(str::to_string),
        }
    }

    #[test]
    fn empty_page_has_form_and_no_panel() {
        let f = TransactionForm::default();
        let html = render(&PageModel {
            form: &f,
            panel: &Panel::Empty,
            report_url: None,
        });
        assert!(html.contains(r#"action="/analyze""#));
        assert!(html.contains("<title>FraudShield | transaction check</title>"));
        assert!(!html.contains('\u{2014}'));
        assert!(html.contains("ATM Withdrawal"));
        assert!(!html.contains("resultSection"));
    }

    #[test]
    fn entered_values_are_kept_and_escaped() {
        let f = form(r#""><script>"#, Some("2"));
        let html = render(&PageModel {
            form: &f,
            panel: &Panel::Empty,
            report_url: None,
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"value="2" checked"#));
        assert!(html.contains("width:50.0%"));
    }

    #[test]
    fn error_panel_hides_metrics() {
        let f = form("", None);
        let panel = Panel::Error(ErrorView::new("Please select a transaction method"));
        let html = render(&PageModel {
            form: &f,
            panel: &panel,
            report_url: None,
        });
        assert!(html.contains("Please select a transaction method"));
        assert!(html.contains("❌"));
        assert!(!html.contains("result-metrics"));
        assert!(!html.contains("result-actions"));
    }

    #[test]
    fn result_panel_renders_meters_and_report_link() {
        let f = form("100", Some("0"));
        let view = ResultView::from_response(&PredictResponse {
            is_fraud: true,
            confidence: 72.46,
            fraud_probability: 72.46,
            legitimate_probability: 27.54,
            prediction: None,
        });
        let panel = Panel::Result(view);
        let html = render(&PageModel {
            form: &f,
            panel: &panel,
            report_url: Some("http://localhost:3000/report/abc"),
        });
        assert!(html.contains("High Fraud Risk Detected"));
        assert!(html.contains("72.5%"));
        assert!(html.contains("--w:27.5%"));
        assert!(html.contains("http://localhost:3000/report/abc"));
        assert!(!html.contains(r#"class="particle""#));
    }
}
