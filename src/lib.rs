pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;

use std::sync::Arc;

pub use application::{PayOrderUseCase, PaymentResult};
pub use config::Config;
pub use domain::{DomainError, Money, Order, OrderLine, OrderStatus};
pub use errors::AppError;
pub use infrastructure::{FakePaymentGateway, InMemoryOrderRepository};

pub type InMemoryPayOrder =
    PayOrderUseCase<Arc<InMemoryOrderRepository>, Arc<FakePaymentGateway>>;

/// In-memory collaborators wired into a ready-to-run use case.
pub struct Services {
    pub orders: Arc<InMemoryOrderRepository>,
    pub gateway: Arc<FakePaymentGateway>,
    pub pay_order: InMemoryPayOrder,
}

/// Build the in-memory store and fake gateway described by `config` and
/// inject them into a `PayOrderUseCase`.
pub fn build_services(config: &Config) -> Services {
    let orders = Arc::new(InMemoryOrderRepository::new());
    let gateway = Arc::new(FakePaymentGateway::new(
        config.gateway_success_rate,
        config.gateway_simulate_failure,
    ));
    let pay_order = PayOrderUseCase::new(orders.clone(), gateway.clone());
    Services {
        orders,
        gateway,
        pay_order,
    }
}
