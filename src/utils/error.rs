use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonLdError {
    #[error("Unsupported value type: {detail}")]
    UnsupportedValueType { detail: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
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

impl JsonLdError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            JsonLdError::UnsupportedValueType { .. }
            | JsonLdError::SerializationError(_)
            | JsonLdError::ProcessingError { .. } => ErrorCategory::Data,
            JsonLdError::ConfigError { .. }
            | JsonLdError::ConfigValidationError { .. }
            | JsonLdError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            JsonLdError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            JsonLdError::UnsupportedValueType { .. } => {
                "Only strings, numbers, booleans, null, arrays and string-keyed objects can be embedded"
            }
            JsonLdError::SerializationError(_) => "Check that the input is well-formed JSON",
            JsonLdError::IoError(_) => "Check that the input and output paths exist and are accessible",
            JsonLdError::ConfigError { .. } | JsonLdError::ConfigValidationError { .. } => {
                "Check the configuration file syntax"
            }
            JsonLdError::InvalidConfigValueError { .. } => {
                "Correct the highlighted configuration value"
            }
            JsonLdError::ProcessingError { .. } => "Make sure the JSON-LD item is a JSON object",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            JsonLdError::UnsupportedValueType { detail } => {
                format!("The item contains a value that cannot be embedded: {}", detail)
            }
            JsonLdError::SerializationError(e) => format!("Could not read the JSON input: {}", e),
            JsonLdError::IoError(e) => format!("File access failed: {}", e),
            JsonLdError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JsonLdError>;
