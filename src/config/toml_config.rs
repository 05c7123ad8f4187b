use crate::core::render::Labels;
use crate::core::tracker::DEFAULT_LIST_LIMIT;
use crate::utils::error::{Result, TrackerError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_PAGE_FILENAME: &str = "metrics.html";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub api: ApiConfig,
    pub output: Option<OutputConfig>,
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub list_limit: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            list_limit: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub page_filename: Option<String>,
}

impl TrackerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_BASE})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrackerError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn list_limit(&self) -> u32 {
        self.api.list_limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }

    pub fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .map(|o| o.path.as_str())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    pub fn page_filename(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.page_filename.as_deref())
            .unwrap_or(DEFAULT_PAGE_FILENAME)
    }
}
