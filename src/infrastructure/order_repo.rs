use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::domain::order::Order;
use crate::domain::ports::{OrderRepository, RepositoryError};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(e: PoisonError<T>) -> Self {
        RepositoryError(format!("order store lock poisoned: {}", e))
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Map-backed order store. Reads hand out clones, so a loaded order can be
/// mutated freely without touching the stored copy until it is saved.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn orders(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Order>>, RepositoryError> {
        Ok(self.orders.lock()?)
    }

    /// Remove an order; returns whether it was present.
    pub fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.orders()?.remove(&id).is_some())
    }

    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.orders()?.clear();
        Ok(())
    }

    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.orders()?.len())
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn get_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders()?.get(&id).cloned())
    }

    fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        log::debug!(
            "saving order {} (status={}, revision={})",
            order.id(),
            order.status(),
            order.revision()
        );
        self.orders()?.insert(order.id(), order.clone());
        Ok(())
    }
}
