use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::errors::DomainError;
use super::money::{Money, DEFAULT_CURRENCY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product entry of an order: unit price times a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    product_id: Uuid,
    product_name: String,
    price: Money,
    quantity: i32,
}

impl OrderLine {
    pub fn new(
        product_id: Uuid,
        product_name: impl Into<String>,
        price: Money,
        quantity: i32,
    ) -> Result<Self, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::invalid_line("Quantity must be positive"));
        }
        if price.is_zero() {
            return Err(DomainError::invalid_line("Price must be positive"));
        }
        Ok(Self {
            product_id,
            product_name: product_name.into(),
            price,
            quantity,
        })
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn subtotal(&self) -> Money {
        // quantity is positive by construction
        self.price.multiply(self.quantity.unsigned_abs())
    }
}

/// Aggregate root: a customer's order and its lines.
///
/// Every mutator checks the lifecycle before touching state, so an order is
/// never observable in an invalid state: only a `Pending` order can change,
/// and `pay` refuses to transition an empty one.
#[derive(Debug, Clone)]
pub struct Order {
    id: Uuid,
    customer_id: Uuid,
    currency: String,
    lines: Vec<OrderLine>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    revision: u64,
}

impl Order {
    pub fn new(customer_id: Uuid) -> Self {
        Self::with_currency(customer_id, DEFAULT_CURRENCY)
    }

    /// Create an order whose empty total is expressed in `currency`.
    pub fn with_currency(customer_id: Uuid, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            currency: currency.into(),
            lines: Vec::new(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
            revision: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Add `quantity` units of a product. A product already on the order has
    /// its quantity increased instead of getting a second line.
    pub fn add_line(
        &mut self,
        product_id: Uuid,
        product_name: impl Into<String>,
        price: Money,
        quantity: i32,
    ) -> Result<(), DomainError> {
        self.check_modifiable()?;

        if let Some(idx) = self.position_of(product_id) {
            if quantity <= 0 {
                return Err(DomainError::invalid_line("Quantity must be positive"));
            }
            let line = &mut self.lines[idx];
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| DomainError::invalid_line("Quantity is too large"))?;
        } else {
            self.lines
                .push(OrderLine::new(product_id, product_name, price, quantity)?);
        }
        self.revision += 1;
        Ok(())
    }

    pub fn remove_line(&mut self, product_id: Uuid) -> Result<(), DomainError> {
        self.check_modifiable()?;

        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            self.revision += 1;
        }
        Ok(())
    }

    /// Set the quantity of an existing line; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        self.check_modifiable()?;

        let Some(idx) = self.position_of(product_id) else {
            return Err(DomainError::ProductNotFound(product_id));
        };
        if quantity <= 0 {
            return self.remove_line(product_id);
        }
        self.lines[idx].quantity = quantity;
        self.revision += 1;
        Ok(())
    }

    pub fn clear_lines(&mut self) -> Result<(), DomainError> {
        self.check_modifiable()?;
        self.lines.clear();
        self.revision += 1;
        Ok(())
    }

    /// Sum of all line subtotals, recomputed on every call.
    ///
    /// Lines in different currencies fail with `CurrencyMismatch`.
    pub fn total(&self) -> Result<Money, DomainError> {
        let Some(first) = self.lines.first() else {
            return Ok(Money::zero(self.currency.clone()));
        };
        self.lines
            .iter()
            .try_fold(Money::zero(first.price.currency()), |acc, line| {
                acc.add(&line.subtotal())
            })
    }

    pub fn pay(&mut self) -> Result<(), DomainError> {
        if self.lines.is_empty() {
            return Err(DomainError::EmptyOrder);
        }
        match self.status {
            OrderStatus::Paid => return Err(DomainError::OrderAlreadyPaid),
            OrderStatus::Cancelled => {
                return Err(DomainError::OrderCannotBeModified(self.status.as_str()))
            }
            OrderStatus::Pending => {}
        }

        self.status = OrderStatus::Paid;
        self.paid_at = Some(Utc::now());
        self.revision += 1;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.check_modifiable()?;
        self.status = OrderStatus::Cancelled;
        self.revision += 1;
        Ok(())
    }

    fn position_of(&self, product_id: Uuid) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }

    fn check_modifiable(&self) -> Result<(), DomainError> {
        match self.status {
            OrderStatus::Pending => Ok(()),
            status => Err(DomainError::OrderCannotBeModified(status.as_str())),
        }
    }
}
