use std::process::ExitCode;

use dotenvy::dotenv;
use order_payment::domain::OrderRepository;
use order_payment::{build_services, AppError, Config, Money, Order};
use uuid::Uuid;

fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    log::info!(
        "gateway success_rate={} simulate_failure={} currency={}",
        config.gateway_success_rate,
        config.gateway_simulate_failure,
        config.default_currency
    );

    let services = build_services(&config);

    let mut order = Order::with_currency(Uuid::new_v4(), &config.default_currency);
    order.add_line(
        Uuid::new_v4(),
        "Laptop",
        Money::parse("999.99", &config.default_currency)?,
        1,
    )?;
    order.add_line(
        Uuid::new_v4(),
        "Mouse",
        Money::parse("29.99", &config.default_currency)?,
        2,
    )?;
    services.orders.save(&order)?;
    log::info!("seeded order {} totalling {}", order.id(), order.total()?);

    let result = services.pay_order.execute(order.id());
    println!("{}", serde_json::to_string_pretty(&result)?);
    println!(
        "{}",
        serde_json::to_string_pretty(&services.gateway.transaction_history())?
    );

    if result.is_success() {
        Ok(())
    } else {
        Err(AppError::from(&result))
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
