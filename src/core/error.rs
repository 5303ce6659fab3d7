//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error, also raised for malformed level trees
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Formatter keys are a single ASCII letter
    #[error("Invalid formatter key {key:?}: expected a single ASCII letter")]
    InvalidFormatterKey { key: char },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A target sink rejected a message
    #[error("Sink error: {0}")]
    SinkError(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a formatter key error
    pub fn formatter_key(key: char) -> Self {
        LoggerError::InvalidFormatterKey { key }
    }

    /// Create a sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LoggerError::SinkError(msg.into())
    }
}
