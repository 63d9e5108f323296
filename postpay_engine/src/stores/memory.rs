use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, RwLock},
};

use log::debug;

use crate::{
    order_types::{Order, OrderState, Payment, StatusHistoryEntry, STATE_CANCELED},
    traits::{OrderStore, OrderStoreError},
};

/// An in-memory [`OrderStore`].
///
/// This is the reference implementation used by the engine's tests and by the demo server wiring. Production
/// deployments implement [`OrderStore`] against the hosting platform's own persistence instead.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    orders: HashMap<String, Order>,
    processed_refunds: HashSet<String>,
    emails_sent: Vec<String>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let store = Self::default();
        for order in orders {
            store.insert_order(order);
        }
        store
    }

    pub fn insert_order(&self, order: Order) {
        let mut inner = self.inner.write().expect("order store lock poisoned");
        inner.orders.insert(order.increment_id.clone(), order);
    }

    /// Snapshot of the stored order, for inspection.
    pub fn order(&self, increment_id: &str) -> Option<Order> {
        let inner = self.inner.read().expect("order store lock poisoned");
        inner.orders.get(increment_id).cloned()
    }

    /// Increment ids of every order a confirmation email was requested for.
    pub fn emails_sent(&self) -> Vec<String> {
        let inner = self.inner.read().expect("order store lock poisoned");
        inner.emails_sent.clone()
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, OrderStoreError> {
        self.inner.write().map_err(|_| OrderStoreError::Backend("order store lock poisoned".to_string()))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, OrderStoreError> {
        self.inner.read().map_err(|_| OrderStoreError::Backend("order store lock poisoned".to_string()))
    }
}

impl OrderStore for MemoryOrderStore {
    async fn fetch_order_by_increment_id(&self, increment_id: &str) -> Result<Option<Order>, OrderStoreError> {
        Ok(self.read()?.orders.get(increment_id).cloned())
    }

    async fn update_payment(&self, increment_id: &str, payment: Payment) -> Result<(), OrderStoreError> {
        let mut inner = self.write()?;
        let order =
            inner.orders.get_mut(increment_id).ok_or_else(|| OrderStoreError::NotFound(increment_id.to_string()))?;
        order.payment = Some(payment);
        Ok(())
    }

    async fn set_order_state(
        &self,
        increment_id: &str,
        state: &OrderState,
        status: &str,
        comment: &str,
    ) -> Result<Order, OrderStoreError> {
        let mut inner = self.write()?;
        let order =
            inner.orders.get_mut(increment_id).ok_or_else(|| OrderStoreError::NotFound(increment_id.to_string()))?;
        order.state = state.clone();
        order.status = status.to_string();
        order.status_history.push(StatusHistoryEntry::now(comment));
        debug!("🗃️ Order {increment_id} moved to state {state}");
        Ok(order.clone())
    }

    async fn cancel_order(&self, increment_id: &str, comment: &str) -> Result<Order, OrderStoreError> {
        let mut inner = self.write()?;
        let order =
            inner.orders.get_mut(increment_id).ok_or_else(|| OrderStoreError::NotFound(increment_id.to_string()))?;
        order.state = OrderState::from(STATE_CANCELED);
        order.status = STATE_CANCELED.to_string();
        order.status_history.push(StatusHistoryEntry::now(comment));
        debug!("🗃️ Order {increment_id} canceled");
        Ok(order.clone())
    }

    async fn mark_refund_processed(&self, creditmemo_id: &str) -> Result<bool, OrderStoreError> {
        Ok(self.write()?.processed_refunds.insert(creditmemo_id.to_string()))
    }

    async fn send_order_email(&self, increment_id: &str) -> Result<bool, OrderStoreError> {
        let mut inner = self.write()?;
        if !inner.orders.contains_key(increment_id) {
            return Err(OrderStoreError::NotFound(increment_id.to_string()));
        }
        inner.emails_sent.push(increment_id.to_string());
        Ok(true)
    }
}
