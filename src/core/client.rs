use crate::domain::model::{MetricPayload, MetricRecord};
use crate::domain::ports::MetricsApi;
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_SAVE_ERROR: &str = "Ошибка сохранения";

/// `MetricsApi` over HTTP.
pub struct HttpMetricsApi {
    base_url: String,
    client: Client,
    save_error_message: String,
}

impl HttpMetricsApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            save_error_message: DEFAULT_SAVE_ERROR.to_string(),
        })
    }

    /// Message used when a rejected create carries no `detail`.
    pub fn with_save_error_message(mut self, message: impl Into<String>) -> Self {
        self.save_error_message = message.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pull a human readable message out of an error body.
///
/// A string `detail` is used as is. Structured details (validation error lists) are
/// passed through as JSON text. Falsy details (`""`, `false`, `0`, `null`) count as absent.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::Bool(false) => None,
        serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl MetricsApi for HttpMetricsApi {
    async fn list_metrics(&self, limit: u32) -> Result<Vec<MetricRecord>> {
        let url = self.endpoint("/metrics");
        tracing::debug!("GET {} limit={}", url, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?;

        let records: Vec<MetricRecord> = response.json().await?;
        tracing::debug!("Fetched {} metric records", records.len());
        Ok(records)
    }

    async fn create_metric(&self, payload: &MetricPayload) -> Result<serde_json::Value> {
        let url = self.endpoint("/metrics");
        tracing::debug!("POST {} url={} strategy={}", url, payload.url, payload.strategy);

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message =
                extract_detail(&body).unwrap_or_else(|| self.save_error_message.clone());
            return Err(TrackerError::RejectedError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let created: serde_json::Value = serde_json::from_slice(&body)?;
        if let Some(id) = created.get("id") {
            tracing::info!("Metric stored with id {}", id);
        }
        Ok(created)
    }

    async fn health(&self) -> Result<()> {
        let url = self.endpoint("/health");
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(TrackerError::UnhealthyError {
                message: format!("{} returned {}", url, status),
            });
        }

        let body: serde_json::Value = response.json().await?;
        match body.get("status").and_then(|s| s.as_str()) {
            Some("ok") => Ok(()),
            other => Err(TrackerError::UnhealthyError {
                message: format!("unexpected status {:?}", other),
            }),
        }
    }
}
