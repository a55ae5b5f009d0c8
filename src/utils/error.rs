use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Content parsing error: {0}")]
    ContentParseError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{resource} '{key}' not found")]
    NotFoundError { resource: String, key: String },

    #[error("Chat assistant unavailable: {reason}")]
    ChatUnavailableError { reason: String },

    #[error("External service error ({status}): {message}")]
    ExternalServiceError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Content,
    Network,
    ExternalService,
    Storage,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortfolioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::ConfigValidationError { .. }
            | PortfolioError::InvalidConfigValueError { .. }
            | PortfolioError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PortfolioError::ContentParseError(_)
            | PortfolioError::ValidationError { .. }
            | PortfolioError::SerializationError(_) => ErrorCategory::Content,
            PortfolioError::ApiError(_) => ErrorCategory::Network,
            PortfolioError::ChatUnavailableError { .. }
            | PortfolioError::ExternalServiceError { .. } => ErrorCategory::ExternalService,
            PortfolioError::IoError(_) => ErrorCategory::Storage,
            PortfolioError::NotFoundError { .. } => ErrorCategory::NotFound,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::ExternalService => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Content => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortfolioError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax and section names"
            }
            PortfolioError::InvalidConfigValueError { .. } => {
                "Correct the reported configuration value and restart"
            }
            PortfolioError::MissingConfigError { .. } => {
                "Add the missing setting to the configuration file or environment"
            }
            PortfolioError::ContentParseError(_) | PortfolioError::SerializationError(_) => {
                "Check the content file against the expected record layout"
            }
            PortfolioError::ValidationError { .. } => {
                "Fix the duplicate identifier or date range in the content file"
            }
            PortfolioError::NotFoundError { .. } => "Check the requested slug or id",
            PortfolioError::ChatUnavailableError { .. } => {
                "Set GEMINI_API_KEY (or chat.api_key) to enable the assistant"
            }
            PortfolioError::ApiError(_) | PortfolioError::ExternalServiceError { .. } => {
                "The chat service did not answer; try again later"
            }
            PortfolioError::IoError(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PortfolioError::NotFoundError { resource, .. } => {
                format!("The requested {} could not be found", resource.to_lowercase())
            }
            PortfolioError::ChatUnavailableError { .. } => {
                "The chat assistant is currently unavailable".to_string()
            }
            PortfolioError::ApiError(_) | PortfolioError::ExternalServiceError { .. } => {
                "The chat assistant could not answer right now".to_string()
            }
            other => other.to_string(),
        }
    }

    /// 供 CLI 使用的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
