//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid AI base URL format")]
    InvalidBaseUrl,

    #[error("AI request timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Maximum output tokens must be greater than zero")]
    InvalidMaxOutputTokens,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Export output directory must not be empty")]
    EmptyOutputDir,
}
