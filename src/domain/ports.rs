use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use super::money::Money;
use super::order::Order;

/// Failure reported by an order store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RepositoryError(pub String);

/// Failure reported by a payment processor; the message is shown to callers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

pub trait OrderRepository: Send + Sync + 'static {
    /// Returns an owned copy; changes become visible to others only after `save`.
    fn get_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError>;
    /// Replaces whatever is stored under `order.id()`.
    fn save(&self, order: &Order) -> Result<(), RepositoryError>;
}

pub trait PaymentGateway: Send + Sync + 'static {
    /// Charge `amount` for `order_id` and return the transaction id.
    fn charge(&self, order_id: Uuid, amount: &Money) -> Result<String, GatewayError>;
}

pub trait TransactionIdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> String;
}

impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    fn get_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        (**self).get_by_id(id)
    }

    fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        (**self).save(order)
    }
}

impl<T: PaymentGateway + ?Sized> PaymentGateway for Arc<T> {
    fn charge(&self, order_id: Uuid, amount: &Money) -> Result<String, GatewayError> {
        (**self).charge(order_id, amount)
    }
}
