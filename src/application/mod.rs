pub mod pay_order;

pub use pay_order::{PayOrderUseCase, PaymentResult};
