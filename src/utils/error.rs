use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV rendering error: {0}")]
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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Failed to start pricing model '{program}': {source}")]
    ModelSpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Pricing model '{program}' did not finish within {seconds}s")]
    ModelTimeoutError { program: String, seconds: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Model,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ReportError::ModelSpawnError { .. } | ReportError::ModelTimeoutError { .. } => {
                ErrorCategory::Model
            }
            ReportError::IoError(_)
            | ReportError::SerializationError(_)
            | ReportError::CsvError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 模型錯誤在取價階段就被降級為「無值」
            ErrorCategory::Model => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::ConfigError { message } => format!("配置錯誤: {}", message),
            ReportError::ConfigValidationError { field, message } => {
                format!("配置欄位 '{}' 無效: {}", field, message)
            }
            ReportError::InvalidConfigValueError { field, value, reason } => {
                format!("配置欄位 '{}' 的值 '{}' 無效: {}", field, value, reason)
            }
            ReportError::MissingConfigError { field } => format!("缺少必要配置: {}", field),
            ReportError::ModelSpawnError { program, .. } => {
                format!("無法啟動定價模型: {}", program)
            }
            ReportError::ModelTimeoutError { program, seconds } => {
                format!("定價模型 {} 超過 {} 秒未結束", program, seconds)
            }
            ReportError::IoError(e) => format!("輸出失敗: {}", e),
            ReportError::SerializationError(e) => format!("JSON 輸出失敗: {}", e),
            ReportError::CsvError(e) => format!("CSV 輸出失敗: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the command line flags or the TOML config file",
            ErrorCategory::Model => {
                "Make sure the pricing program exists and runs from the current directory"
            }
            ErrorCategory::Output => "Check that standard output is writable",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
