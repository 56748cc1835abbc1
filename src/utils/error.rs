use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Unsupported HTTP method: {method}")]
    InvalidMethod { method: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV report error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Expected status {expected}, got {actual}")]
    StatusMismatch { expected: u16, actual: u16 },

    #[error("Fixture '{path}' failed: {details}")]
    FixtureFailed { path: String, details: String },

    #[error("Response log error: {message}")]
    ResponseLogError { message: String },
}

/// 錯誤分類，決定 CLI 的退出碼與提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Assertion,
    Io,
    Data,
}

impl HarnessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarnessError::InvalidMethod { .. }
            | HarnessError::ConfigError { .. }
            | HarnessError::ConfigValidationError { .. }
            | HarnessError::InvalidConfigValueError { .. }
            | HarnessError::MissingConfigError { .. } => ErrorCategory::Configuration,
            HarnessError::Transport(_) => ErrorCategory::Network,
            HarnessError::StatusMismatch { .. } | HarnessError::FixtureFailed { .. } => {
                ErrorCategory::Assertion
            }
            HarnessError::IoError(_) | HarnessError::ResponseLogError { .. } => ErrorCategory::Io,
            HarnessError::SerializationError(_) | HarnessError::CsvError(_) => ErrorCategory::Data,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HarnessError::InvalidMethod { .. } => "Use one of GET, POST, PUT or DELETE",
            HarnessError::Transport(_) => {
                "Check that the target API is running and reachable at the configured base URL"
            }
            HarnessError::StatusMismatch { .. } => {
                "Inspect the response log for the body returned by the API"
            }
            HarnessError::FixtureFailed { .. } => {
                "Verify the fixture requests seed the ids the cases expect"
            }
            HarnessError::IoError(_) | HarnessError::ResponseLogError { .. } => {
                "Check file permissions for the log and report paths"
            }
            HarnessError::SerializationError(_) | HarnessError::CsvError(_) => {
                "Check the payloads and report destination"
            }
            _ => "Review the configuration file and command-line arguments",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not reach the API: {}", self),
            ErrorCategory::Assertion => format!("Check failed: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Data => format!("Data problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
