pub mod toml_config;

use crate::core::render::Labels;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::time::Duration;
use toml_config::TrackerConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "pagespeed-tracker")]
#[command(about = "Submit and browse PageSpeed / Lighthouse metrics")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of the metrics API
    #[arg(long)]
    pub api_base: Option<String>,

    /// Number of recent records to show
    #[arg(long)]
    pub limit: Option<u32>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory the rendered page is written to
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit one run, given as name=value form fields
    Submit {
        #[arg(required = true, value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// Show the most recent runs
    List,
    /// Check that the API is up
    Health,
}

/// Settings after merging the config file with command line overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub list_limit: u32,
    pub timeout_seconds: u64,
    pub output_path: String,
    pub page_filename: String,
    pub labels: Labels,
}

impl From<TrackerConfig> for Settings {
    fn from(config: TrackerConfig) -> Self {
        Self {
            list_limit: config.list_limit(),
            timeout_seconds: config.timeout_seconds(),
            output_path: config.output_path().to_string(),
            page_filename: config.page_filename().to_string(),
            labels: config.labels.clone().unwrap_or_default(),
            api_base_url: config.api.base_url,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Load the config file (if any) and apply flag overrides.
    pub fn resolve(&self) -> Result<Settings> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TrackerConfig::from_file(path)?
            }
            None => TrackerConfig::default(),
        };

        let mut settings = Settings::from(file_config);
        if let Some(base) = &self.api_base {
            settings.api_base_url = base.clone();
        }
        if let Some(limit) = self.limit {
            settings.list_limit = limit;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_seconds = timeout;
        }
        if let Some(path) = &self.output_path {
            settings.output_path = path.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::{validate_path, validate_positive_number, validate_url};

        validate_url("api_base", &self.api_base_url)?;
        validate_positive_number("limit", u64::from(self.list_limit), 1)?;
        validate_positive_number("timeout", self.timeout_seconds, 1)?;
        validate_path("output_path", &self.output_path)?;
        validate_path("page_filename", &self.page_filename)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn list_limit(&self) -> u32 {
        self.list_limit
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_submit_command() {
        let cli = CliConfig::try_parse_from([
            "pagespeed-tracker",
            "--api-base",
            "http://127.0.0.1:9000",
            "submit",
            "url=https://example.com",
            "lcp_ms=2000",
        ])
        .unwrap();

        match &cli.command {
            Command::Submit { fields } => assert_eq!(fields.len(), 2),
            other => panic!("unexpected command: {:?}", other),
        }

        let settings = cli.resolve().unwrap();
        assert_eq!(settings.api_base_url(), "http://127.0.0.1:9000");
        assert_eq!(settings.list_limit(), 10);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_submit_requires_fields() {
        assert!(CliConfig::try_parse_from(["pagespeed-tracker", "submit"]).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[api]
base_url = "https://from-file.example.com"
list_limit = 3

[output]
path = "./from-file"
"#,
            )
            .unwrap();

        let path = temp_file.path().to_string_lossy().into_owned();
        let cli = CliConfig::try_parse_from([
            "pagespeed-tracker",
            "--config",
            path.as_str(),
            "--limit",
            "7",
            "list",
        ])
        .unwrap();

        let settings = cli.resolve().unwrap();
        assert_eq!(settings.api_base_url, "https://from-file.example.com");
        assert_eq!(settings.list_limit, 7);
        assert_eq!(settings.output_path, "./from-file");
    }

    #[test]
    fn test_zero_limit_flag_is_rejected() {
        let cli =
            CliConfig::try_parse_from(["pagespeed-tracker", "--limit", "0", "list"]).unwrap();
        assert!(cli.resolve().is_err());
    }
}
