use thiserror::Error;

use crate::application::PaymentResult;
use crate::config::ConfigError;
use crate::domain::errors::DomainError;
use crate::domain::ports::RepositoryError;

/// Errors surfaced by the runner binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid order: {0}")]
    Domain(#[from] DomainError),

    #[error("Order store error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<&PaymentResult> for AppError {
    fn from(result: &PaymentResult) -> Self {
        AppError::PaymentFailed(result.error.clone().unwrap_or_default())
    }
}
