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

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("CORS origins must be listed explicitly in production")]
    WildcardCorsInProduction,

    #[error("Model attempts must be between 1 and 10, got {0}")]
    InvalidMaxAttempts(u32),

    #[error("At least one intervention per question is required")]
    InvalidMaxInterventions,

    #[error("Readiness threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),
}
