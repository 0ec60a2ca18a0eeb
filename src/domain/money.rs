use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde::Serialize;

use super::errors::DomainError;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Non-negative decimal amount tagged with a currency code.
///
/// Values are immutable: `add` and `multiply` return new instances. Equality
/// is numeric on the amount, so `10.5 USD == 10.50 USD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    amount: BigDecimal,
    currency: String,
}

impl Money {
    pub fn new(amount: BigDecimal, currency: impl Into<String>) -> Result<Self, DomainError> {
        if amount < BigDecimal::zero() {
            return Err(DomainError::invalid_amount("Amount cannot be negative"));
        }
        Ok(Self {
            amount,
            currency: currency.into(),
        })
    }

    pub fn usd(amount: BigDecimal) -> Result<Self, DomainError> {
        Self::new(amount, DEFAULT_CURRENCY)
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Self {
            amount: BigDecimal::zero(),
            currency: currency.into(),
        }
    }

    /// Parse a decimal string such as `"9.99"`.
    pub fn parse(amount: &str, currency: impl Into<String>) -> Result<Self, DomainError> {
        let amount = BigDecimal::from_str(amount)
            .map_err(|e| DomainError::invalid_amount(format!("'{}': {}", amount, e)))?;
        Self::new(amount, currency)
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(Money {
            amount: &self.amount + &other.amount,
            currency: self.currency.clone(),
        })
    }

    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            amount: &self.amount * BigDecimal::from(quantity),
            currency: self.currency.clone(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.currency,
            self.amount.with_scale_round(2, RoundingMode::HalfEven)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(s: &str) -> Money {
        Money::parse(s, "USD").expect("valid amount")
    }

    #[test]
    fn new_keeps_amount_and_currency() {
        let money = usd("100.50");
        assert_eq!(money.amount(), &BigDecimal::from_str("100.50").unwrap());
        assert_eq!(money.currency(), "USD");
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = Money::parse("-10", "USD").unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
    }

    #[test]
    fn zero_amount_is_allowed() {
        assert!(usd("0").is_zero());
    }

    #[test]
    fn malformed_amount_is_rejected() {
        let err = Money::parse("ten", "USD").unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
    }

    #[test]
    fn add_same_currency() {
        let sum = usd("50.25").add(&usd("25.75")).unwrap();
        assert_eq!(sum, usd("76.00"));
    }

    #[test]
    fn add_different_currency_fails() {
        let eur = Money::parse("100", "EUR").unwrap();
        let err = usd("100").add(&eur).unwrap_err();
        assert_eq!(
            err,
            DomainError::CurrencyMismatch {
                left: "USD".to_string(),
                right: "EUR".to_string()
            }
        );
    }

    #[test]
    fn multiply_by_quantity() {
        assert_eq!(usd("10.99").multiply(3), usd("32.97"));
        assert!(usd("10.99").multiply(0).is_zero());
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(usd("100.00"), usd("100"));
        assert_ne!(usd("100.00"), usd("200.00"));
        assert_ne!(usd("100"), Money::parse("100", "EUR").unwrap());
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(usd("1059.97").to_string(), "USD 1059.97");
        assert_eq!(usd("5").to_string(), "USD 5.00");
    }
}
