pub mod errors;
pub mod money;
pub mod order;
pub mod ports;

pub use errors::DomainError;
pub use money::{Money, DEFAULT_CURRENCY};
pub use order::{Order, OrderLine, OrderStatus};
pub use ports::{
    GatewayError, OrderRepository, PaymentGateway, RepositoryError, TransactionIdGenerator,
};
