use serde::Serialize;
use uuid::Uuid;

use crate::domain::ports::{OrderRepository, PaymentGateway};

const PROCESSING_ERROR_PREFIX: &str = "Payment processing error: ";

/// Outcome of one payment attempt. Exactly one of `transaction_id` and
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentResult {
    pub success: bool,
    pub order_id: Option<Uuid>,
    pub transaction_id: Option<String>,
    pub error: Option<String>,
}

impl PaymentResult {
    pub fn succeeded(order_id: Uuid, transaction_id: impl Into<String>) -> Self {
        Self {
            success: true,
            order_id: Some(order_id),
            transaction_id: Some(transaction_id.into()),
            error: None,
        }
    }

    pub fn failed(order_id: Uuid, error: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: Some(order_id),
            transaction_id: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Pays an order: load it, apply the domain transition, charge the gateway,
/// then persist.
///
/// Nothing escapes `execute`; every failure becomes a failed `PaymentResult`.
/// The order is only saved after the gateway accepted the charge, so a
/// declined payment leaves the stored order `Pending` even though the copy
/// loaded for this call was already moved to `Paid`.
pub struct PayOrderUseCase<R, G> {
    repo: R,
    gateway: G,
}

impl<R: OrderRepository, G: PaymentGateway> PayOrderUseCase<R, G> {
    pub fn new(repo: R, gateway: G) -> Self {
        Self { repo, gateway }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn execute(&self, order_id: Uuid) -> PaymentResult {
        // 1. Load
        let mut order = match self.repo.get_by_id(order_id) {
            Ok(Some(order)) => order,
            Ok(None) => {
                log::warn!("payment rejected: order {} not found", order_id);
                return PaymentResult::failed(order_id, format!("Order {} not found", order_id));
            }
            Err(e) => return self.infrastructure_failure(order_id, e),
        };

        // 2. Domain transition
        let total = match order.pay().and_then(|_| order.total()) {
            Ok(total) => total,
            Err(e) => {
                log::warn!("payment rejected for order {}: {}", order_id, e);
                return PaymentResult::failed(order_id, e.to_string());
            }
        };

        // 3. Charge
        let transaction_id = match self.gateway.charge(order_id, &total) {
            Ok(id) => id,
            Err(e) => return self.infrastructure_failure(order_id, e),
        };

        // 4. Persist
        if let Err(e) = self.repo.save(&order) {
            return self.infrastructure_failure(order_id, e);
        }

        log::info!(
            "order {} paid: {} charged, transaction {}",
            order_id,
            total,
            transaction_id
        );
        PaymentResult::succeeded(order_id, transaction_id)
    }

    fn infrastructure_failure(&self, order_id: Uuid, e: impl std::fmt::Display) -> PaymentResult {
        log::error!("payment failed for order {}: {}", order_id, e);
        PaymentResult::failed(order_id, format!("{}{}", PROCESSING_ERROR_PREFIX, e))
    }
}
