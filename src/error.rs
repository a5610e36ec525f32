//! Error types for Brushsense

use thiserror::Error;

/// Main error type for Brushsense
#[derive(Error, Debug)]
pub enum BrushsenseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Landmark tracking errors
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Landmark receiver error: {0}")]
    Receiver(String),

    #[error("Landmark parse error: {0}")]
    Parse(String),
}

/// Session scheduling errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid zone index: {0}")]
    InvalidZone(usize),
}

/// Result type alias for Brushsense operations
pub type Result<T> = std::result::Result<T, BrushsenseError>;
