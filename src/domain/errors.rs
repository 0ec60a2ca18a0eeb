use thiserror::Error;
use uuid::Uuid;

/// Business-rule violations raised by the order aggregate and its values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Cannot pay empty order")]
    EmptyOrder,
    #[error("Order is already paid")]
    OrderAlreadyPaid,
    #[error("Cannot modify {0} order")]
    OrderCannotBeModified(&'static str),
    #[error("{0}")]
    InvalidOrderLine(String),
    #[error("Product {0} not found in order")]
    ProductNotFound(Uuid),
    #[error("Cannot add different currencies: {left} and {right}")]
    CurrencyMismatch { left: String, right: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl DomainError {
    pub fn invalid_line(msg: impl Into<String>) -> Self {
        Self::InvalidOrderLine(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }
}
