//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name that matches none of the canonical severities
    #[error("Invalid log level: '{name}'")]
    InvalidLevel { name: String },

    /// Numeric weight that matches none of the canonical severities
    #[error("Invalid log level value: {value}")]
    InvalidLevelValue { value: u16 },

    /// Operation that log entries refuse to perform (clone, serialize)
    #[error("Operation not supported on log entries: {operation}")]
    NotSupported { operation: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Appender failure with appender name
    #[error("Appender '{name}' failed: {message}")]
    AppenderError { name: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid level error for an unknown name
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create an invalid level error for an unknown weight
    pub fn invalid_level_value(value: u16) -> Self {
        LoggerError::InvalidLevelValue { value }
    }

    /// Create a not supported error
    pub fn not_supported(operation: impl Into<String>) -> Self {
        LoggerError::NotSupported {
            operation: operation.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an appender error
    pub fn appender(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderError {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
