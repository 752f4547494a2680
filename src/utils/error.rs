use thiserror::Error;

#[derive(Error, Debug)]
pub enum CitiesError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{title}: {message}")]
    BadRequest { title: String, message: String },

    #[error("{title}: {message}")]
    DataProcessing { title: String, message: String },

    #[error("Element with id '{id}' not found in document")]
    ElementNotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Request,
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
    /// Process exit code for a failure of this severity. Low is a warning
    /// and still exits successfully.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Low => 0,
            Self::Medium => 2,
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl CitiesError {
    pub fn bad_request(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Title doubles as message when only one is given.
    pub fn data_processing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::DataProcessing {
            title: message.clone(),
            message,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::CsvError(_) | Self::SerializationError(_) | Self::DataProcessing { .. } => {
                ErrorCategory::Data
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::BadRequest { .. } | Self::ElementNotFound { .. } => ErrorCategory::Request,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check that the cities API is running and reachable",
            Self::CsvError(_) => "Check that the data files are CSV with an 'id,name' header",
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => {
                "Check that the API returns a JSON object with a 'content' array"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => "Review the configuration values",
            Self::BadRequest { .. } => "Adjust the page and size parameters",
            Self::DataProcessing { .. } => "Check that the word and city data are populated",
            Self::ElementNotFound { .. } => {
                "Make sure the page template contains an element with the target id"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_connect() => "Could not connect to the cities API".to_string(),
            Self::ApiError(e) => match e.status() {
                Some(status) => format!("The cities API answered with status {}", status),
                None => "The request to the cities API failed".to_string(),
            },
            Self::SerializationError(_) => "The cities API returned an unexpected body".to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status the API answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            _ => 500,
        }
    }

    /// Message code exposed as the `type` of an API error body.
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "BadRequest",
            Self::DataProcessing { .. } => "DataProcessingError",
            _ => "InternalError",
        }
    }
}

pub type Result<T> = std::result::Result<T, CitiesError>;
