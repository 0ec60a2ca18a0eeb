pub mod order_repo;
pub mod payment_gateway;

pub use order_repo::InMemoryOrderRepository;
pub use payment_gateway::{
    FakePaymentGateway, RandomTransactionIds, SequentialTransactionIds, TransactionRecord,
};
