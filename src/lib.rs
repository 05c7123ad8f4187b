pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{page::HtmlPage, storage::LocalStorage};
pub use crate::config::{toml_config::TrackerConfig, Settings};
pub use crate::core::{
    client::HttpMetricsApi,
    form::build_payload,
    render::Labels,
    tracker::{MetricsTracker, SubmitOutcome},
};
pub use crate::domain::model::{FormData, MetricPayload, MetricRecord, StatusKind, Strategy};
pub use crate::utils::error::{Result, TrackerError};
