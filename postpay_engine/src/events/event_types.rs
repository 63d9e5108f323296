use serde::{Deserialize, Serialize};

use crate::order_types::Order;

/// Published after a captured order has been transitioned to the configured success state and saved.
///
/// This is the trigger for the best-effort confirmation email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmedEvent {
    pub order: Order,
}

impl OrderConfirmedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}

/// Published after an order has been routed to the failure path (denied status or a rejected capture).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDeclinedEvent {
    pub order: Order,
    pub reason: String,
}

impl OrderDeclinedEvent {
    pub fn new(order: Order, reason: impl Into<String>) -> Self {
        Self { order, reason: reason.into() }
    }
}
