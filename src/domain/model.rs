use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::utils::error::TrackerError;

/// Measurement profile of a Lighthouse run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }

    /// Lenient reading used for display: only `"desktop"` is desktop.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("desktop") => Strategy::Desktop,
            _ => Strategy::Mobile,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Strategy::Mobile),
            "desktop" => Ok(Strategy::Desktop),
            other => Err(TrackerError::InvalidFieldError {
                field: "strategy".to_string(),
                value: other.to_string(),
                reason: "expected 'mobile' or 'desktop'".to_string(),
            }),
        }
    }
}

/// Raw form fields keyed by input name. Values are kept exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Parse `name=value` pairs, e.g. from the command line.
    ///
    /// A repeated name keeps its first value, like `FormData.get` in a browser.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, TrackerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut form = FormData::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                TrackerError::InvalidFieldError {
                    field: pair.to_string(),
                    value: String::new(),
                    reason: "expected name=value".to_string(),
                }
            })?;
            form.fields
                .entry(name.trim().to_string())
                .or_insert_with(|| value.to_string());
        }
        Ok(form)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut form = FormData::new();
        for (k, v) in iter {
            form.insert(k, v);
        }
        form
    }
}

/// Body of `POST /metrics`. Every key is always present; absent values go out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPayload {
    pub url: String,
    pub run_datetime: Option<String>,
    pub strategy: Strategy,

    pub score_performance: Option<serde_json::Number>,
    pub score_accessibility: Option<serde_json::Number>,
    pub score_best_practices: Option<serde_json::Number>,
    pub score_seo: Option<serde_json::Number>,

    pub fcp_ms: Option<serde_json::Number>,
    pub lcp_ms: Option<serde_json::Number>,
    pub inp_ms: Option<serde_json::Number>,
    pub ttfb_ms: Option<serde_json::Number>,
    pub cls: Option<serde_json::Number>,
    pub speed_index_ms: Option<serde_json::Number>,
    pub tbt_ms: Option<serde_json::Number>,

    pub total_requests: Option<serde_json::Number>,
    pub total_transfer_kb: Option<serde_json::Number>,

    pub notes: Option<String>,
}

/// One element of the `GET /metrics` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricRecord {
    pub id: Option<i64>,
    pub url: String,
    pub strategy: Option<String>,
    pub run_datetime: Option<String>,
    pub created_at: Option<String>,

    pub score_performance: Option<f64>,
    pub score_accessibility: Option<f64>,
    pub score_best_practices: Option<f64>,
    pub score_seo: Option<f64>,

    pub fcp_ms: Option<f64>,
    pub lcp_ms: Option<f64>,
    pub inp_ms: Option<f64>,
    pub ttfb_ms: Option<f64>,
    pub cls: Option<f64>,
    pub speed_index_ms: Option<f64>,
    pub tbt_ms: Option<f64>,

    pub total_requests: Option<f64>,
    pub total_transfer_kb: Option<f64>,

    pub notes: Option<String>,
}

impl MetricRecord {
    /// When the run happened, falling back to when it was stored.
    pub fn timestamp(&self) -> Option<&str> {
        self.run_datetime
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.created_at.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Neutral,
    Success,
    Error,
}

impl StatusKind {
    /// CSS class of the status element.
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Neutral => "status ",
            StatusKind::Success => "status success",
            StatusKind::Error => "status error",
        }
    }
}
