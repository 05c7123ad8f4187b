pub mod client;
pub mod form;
pub mod render;
pub mod tracker;

pub use crate::domain::model::{FormData, MetricPayload, MetricRecord, StatusKind, Strategy};
pub use crate::domain::ports::{ConfigProvider, MetricsApi, MetricsView, Storage};
pub use crate::utils::error::Result;
