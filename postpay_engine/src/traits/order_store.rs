use thiserror::Error;

use crate::order_types::{Order, OrderState, Payment};

#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    #[error("Order store backend error: {0}")]
    Backend(String),
    #[error("No order with increment id {0}")]
    NotFound(String),
}

/// Everything the reconciliation engine asks of the hosting platform's order subsystem.
///
/// Implementations persist each mutation as a single blocking save. No transaction spans a gateway call and a
/// store save; the engine handles that partial-failure window itself.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Load an order by its increment id. Returns `None` when the order does not exist.
    async fn fetch_order_by_increment_id(&self, increment_id: &str) -> Result<Option<Order>, OrderStoreError>;

    /// Replace the payment record attached to the given order.
    async fn update_payment(&self, increment_id: &str, payment: Payment) -> Result<(), OrderStoreError>;

    /// Set the order's state and status label and append a status-history comment, returning the saved order.
    async fn set_order_state(
        &self,
        increment_id: &str,
        state: &OrderState,
        status: &str,
        comment: &str,
    ) -> Result<Order, OrderStoreError>;

    /// Cancel the order with a status-history comment. Cancellation is distinct from a plain state change:
    /// platform-side effects such as inventory return hang off it.
    async fn cancel_order(&self, increment_id: &str, comment: &str) -> Result<Order, OrderStoreError>;

    /// Record that the given credit memo's refund has been issued. Returns `false` when the memo was already
    /// recorded, in which case the caller must not refund again. This is the refund dedup key.
    async fn mark_refund_processed(&self, creditmemo_id: &str) -> Result<bool, OrderStoreError>;

    /// Ask the platform to send the order confirmation email. The boolean reports whether the platform accepted
    /// the send; either way this is best-effort from the engine's point of view.
    fn send_order_email(
        &self,
        increment_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, OrderStoreError>> + Send;
}
