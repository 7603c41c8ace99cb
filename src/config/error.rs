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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("AI timeout ({ai_secs}s) must be below the request timeout ({server_secs}s)")]
    AiTimeoutExceedsRequestTimeout { ai_secs: u64, server_secs: u64 },

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("max_output_tokens must be positive")]
    InvalidMaxOutputTokens,

    #[error("Status interval must be at least 1 second")]
    InvalidStatusInterval,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
