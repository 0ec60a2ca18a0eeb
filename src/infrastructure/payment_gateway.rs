use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::money::Money;
use crate::domain::ports::{GatewayError, PaymentGateway, TransactionIdGenerator};

const TXN_PREFIX: &str = "TXN";
const TXN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const TXN_RANDOM_LEN: usize = 10;

// ── Transaction ids ──────────────────────────────────────────────────────────

/// `TXN_` followed by ten random uppercase letters or digits.
#[derive(Debug, Default)]
pub struct RandomTransactionIds;

impl TransactionIdGenerator for RandomTransactionIds {
    fn next_id(&self) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..TXN_RANDOM_LEN)
            .map(|_| TXN_CHARSET[rng.gen_range(0..TXN_CHARSET.len())] as char)
            .collect();
        format!("{}_{}", TXN_PREFIX, suffix)
    }
}

/// Deterministic ids (`TXN_0000000001`, `TXN_0000000002`, ...) for tests.
#[derive(Debug, Default)]
pub struct SequentialTransactionIds {
    next: AtomicU64,
}

impl TransactionIdGenerator for SequentialTransactionIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{:010}", TXN_PREFIX, n)
    }
}

// ── Transaction history ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub order_id: Uuid,
    #[serde(serialize_with = "serialize_display")]
    pub amount: Money,
    pub transaction_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: &'static str,
}

fn serialize_display<S: serde::Serializer>(money: &Money, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(money)
}

#[derive(Debug, Default)]
struct Ledger {
    transactions: Vec<TransactionRecord>,
    failures_count: usize,
}

// ── Gateway ──────────────────────────────────────────────────────────────────

/// Stand-in payment processor that records every successful charge.
///
/// With `simulate_failure` set, each charge is declined with probability
/// `1 - success_rate`; a rate of `0.0` declines every charge.
pub struct FakePaymentGateway {
    success_rate: f64,
    simulate_failure: bool,
    ids: Box<dyn TransactionIdGenerator>,
    ledger: Mutex<Ledger>,
}

impl FakePaymentGateway {
    pub fn new(success_rate: f64, simulate_failure: bool) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            simulate_failure,
            ids: Box::new(RandomTransactionIds),
            ledger: Mutex::new(Ledger::default()),
        }
    }

    /// A gateway that never declines.
    pub fn approving() -> Self {
        Self::new(1.0, false)
    }

    /// A gateway that declines every charge.
    pub fn always_decline() -> Self {
        Self::new(0.0, true)
    }

    pub fn with_id_generator(mut self, ids: impl TransactionIdGenerator) -> Self {
        self.ids = Box::new(ids);
        self
    }

    fn ledger(&self) -> Result<MutexGuard<'_, Ledger>, GatewayError> {
        self.ledger
            .lock()
            .map_err(|e| GatewayError(format!("transaction ledger unavailable: {}", e)))
    }

    fn declines(&self) -> bool {
        self.simulate_failure && rand::thread_rng().gen::<f64>() >= self.success_rate
    }

    pub fn transaction_history(&self) -> Vec<TransactionRecord> {
        self.ledger()
            .map(|l| l.transactions.clone())
            .unwrap_or_default()
    }

    pub fn transaction_by_order(&self, order_id: Uuid) -> Option<TransactionRecord> {
        self.ledger()
            .ok()?
            .transactions
            .iter()
            .find(|tx| tx.order_id == order_id)
            .cloned()
    }

    pub fn failures_count(&self) -> usize {
        self.ledger().map(|l| l.failures_count).unwrap_or_default()
    }

    pub fn clear_history(&self) {
        if let Ok(mut ledger) = self.ledger() {
            *ledger = Ledger::default();
        }
    }
}

impl PaymentGateway for FakePaymentGateway {
    fn charge(&self, order_id: Uuid, amount: &Money) -> Result<String, GatewayError> {
        let mut ledger = self.ledger()?;

        if self.declines() {
            ledger.failures_count += 1;
            log::warn!("declining charge of {} for order {}", amount, order_id);
            return Err(GatewayError(format!(
                "Payment gateway declined transaction for order {}",
                order_id
            )));
        }

        let transaction_id = self.ids.next_id();
        log::debug!(
            "charged {} for order {} ({})",
            amount,
            order_id,
            transaction_id
        );
        ledger.transactions.push(TransactionRecord {
            order_id,
            amount: amount.clone(),
            transaction_id: transaction_id.clone(),
            timestamp: Utc::now(),
            status: "completed",
        });
        Ok(transaction_id)
    }
}
