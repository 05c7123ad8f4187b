use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Invalid form field {field} ('{value}'): {reason}")]
    InvalidFieldError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server rejected request ({status}): {message}")]
    RejectedError { status: u16, message: String },

    #[error("Service unhealthy: {message}")]
    UnhealthyError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Validation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a failure of this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 輸入或處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl TrackerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::ApiError(_) => ErrorCategory::Network,
            TrackerError::RejectedError { .. } | TrackerError::UnhealthyError { .. } => {
                ErrorCategory::Server
            }
            TrackerError::SerializationError(_)
            | TrackerError::MissingFieldError { .. }
            | TrackerError::InvalidFieldError { .. } => ErrorCategory::Validation,
            TrackerError::ConfigError { .. } | TrackerError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            TrackerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::ApiError(_) | TrackerError::UnhealthyError { .. } => {
                ErrorSeverity::Medium
            }
            TrackerError::RejectedError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            TrackerError::RejectedError { .. }
            | TrackerError::SerializationError(_)
            | TrackerError::MissingFieldError { .. }
            | TrackerError::InvalidFieldError { .. }
            | TrackerError::ConfigError { .. }
            | TrackerError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            TrackerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackerError::ApiError(e) if e.is_timeout() => {
                "The metrics API did not answer in time".to_string()
            }
            TrackerError::ApiError(e) if e.is_connect() => {
                "Could not connect to the metrics API".to_string()
            }
            TrackerError::ApiError(_) => "Request to the metrics API failed".to_string(),
            TrackerError::RejectedError { message, .. } => message.clone(),
            TrackerError::MissingFieldError { field } => {
                format!("Field '{}' is required", field)
            }
            TrackerError::InvalidFieldError { field, reason, .. } => {
                format!("Field '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the API base URL is reachable and try again",
            ErrorCategory::Server => "Inspect the server response and the submitted values",
            ErrorCategory::Validation => "Fix the form values and submit again",
            ErrorCategory::Configuration => "Review the config file and command line flags",
            ErrorCategory::System => "Check file permissions and free disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
