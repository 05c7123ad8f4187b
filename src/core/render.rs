use crate::domain::model::{MetricRecord, StatusKind, Strategy};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const PLACEHOLDER: &str = "-";
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Text shown around rendered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub mobile: String,
    pub desktop: String,
    pub performance: String,
    pub lcp: String,
    pub cls: String,
    pub ms_unit: String,
    pub saving: String,
    pub saved: String,
    pub error_prefix: String,
    pub save_failed: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            mobile: "Мобильная".to_string(),
            desktop: "Десктоп".to_string(),
            performance: "Производительность".to_string(),
            lcp: "Отрисовка крупнейшего элемента".to_string(),
            cls: "Смещение макета".to_string(),
            ms_unit: "мс".to_string(),
            saving: "Сохраняю...".to_string(),
            saved: "Сохранено ✅".to_string(),
            error_prefix: "Ошибка: ".to_string(),
            save_failed: "Ошибка сохранения".to_string(),
        }
    }
}

impl Labels {
    pub fn english() -> Self {
        Self {
            mobile: "Mobile".to_string(),
            desktop: "Desktop".to_string(),
            performance: "Performance".to_string(),
            lcp: "Largest Contentful Paint".to_string(),
            cls: "Layout shift".to_string(),
            ms_unit: "ms".to_string(),
            saving: "Saving...".to_string(),
            saved: "Saved ✅".to_string(),
            error_prefix: "Error: ".to_string(),
            save_failed: "Failed to save".to_string(),
        }
    }

    pub fn strategy(&self, strategy: Strategy) -> &str {
        match strategy {
            Strategy::Desktop => &self.desktop,
            Strategy::Mobile => &self.mobile,
        }
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn number_or_placeholder(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format an API timestamp for display.
///
/// Values with an offset are shown in local time, naive values as given.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(TIMESTAMP_FORMAT).to_string();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.format(TIMESTAMP_FORMAT).to_string();
        }
    }

    tracing::debug!("Unparseable timestamp '{}'", raw);
    PLACEHOLDER.to_string()
}

/// Render one record as a `metric-item` block.
pub fn render_record(record: &MetricRecord, labels: &Labels) -> String {
    let strategy = Strategy::from_wire(record.strategy.as_deref());

    format!(
        r#"<div class="metric-item">
  <span><strong>{url}</strong></span>
  <span>{strategy}</span>
  <span>{perf_label}: {perf}</span>
  <span>{lcp_label}: {lcp} {ms}</span>
  <span>{cls_label}: {cls}</span>
  <span>{when}</span>
</div>"#,
        url = escape_html(&record.url),
        strategy = escape_html(labels.strategy(strategy)),
        perf_label = escape_html(&labels.performance),
        perf = number_or_placeholder(record.score_performance),
        lcp_label = escape_html(&labels.lcp),
        lcp = number_or_placeholder(record.lcp_ms),
        ms = escape_html(&labels.ms_unit),
        cls_label = escape_html(&labels.cls),
        cls = number_or_placeholder(record.cls),
        when = escape_html(&format_timestamp(record.timestamp())),
    )
}

/// Full page with the status line and the metrics container.
pub fn render_page(status: &str, kind: StatusKind, items: &[String]) -> String {
    let mut body = String::new();
    for item in items {
        body.push_str(item);
        body.push('\n');
    }

    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <title>PageSpeed Metrics Tracker</title>
</head>
<body>
  <div id="status" class="{class}">{status}</div>
  <div id="metrics-items">
{body}  </div>
</body>
</html>
"#,
        class = kind.css_class(),
        status = escape_html(status),
        body = body,
    )
}
