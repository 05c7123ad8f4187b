use crate::domain::model::{MetricPayload, MetricRecord, StatusKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn list_limit(&self) -> u32;
    fn request_timeout(&self) -> Duration;
    fn output_path(&self) -> &str;
}

/// The metrics backend.
#[async_trait]
pub trait MetricsApi: Send + Sync {
    async fn list_metrics(&self, limit: u32) -> Result<Vec<MetricRecord>>;
    async fn create_metric(&self, payload: &MetricPayload) -> Result<serde_json::Value>;
    async fn health(&self) -> Result<()>;
}

/// Where status messages and rendered records end up.
pub trait MetricsView {
    fn set_status(&mut self, message: &str, kind: StatusKind);
    fn clear_items(&mut self);
    fn append_item(&mut self, html: String);
}
