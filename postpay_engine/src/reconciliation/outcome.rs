use ppg_common::GatewayAmount;
use serde::{Deserialize, Serialize};

use crate::order_types::OrderState;

/// Where the shopper's browser is sent after a confirmation callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedirectTarget {
    /// The storefront's order-success page.
    OrderSuccess,
    /// The storefront's cart page, for failed or denied payments.
    Cart,
}

/// Which terminal transition [`super::ReconciliationApi::apply_terminal_status`] should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalDisposition {
    Success,
    Failure,
}

/// How a confirmation callback was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CaptureResolution {
    /// The gateway accepted the capture.
    Captured { amount: GatewayAmount, currency: String, transaction_id: String },
    /// The gateway rejected the capture; the order was routed to the failure path.
    CaptureFailed { code: String },
    /// The gateway still reports the order as pending. Nothing was changed.
    Pending,
    /// The gateway denied the transaction (or reported a status we do not recognise).
    Denied { status: String },
    /// The order was already in a terminal state; this callback was a re-delivery and changed nothing.
    AlreadyFinalized { state: OrderState },
}

/// The result of a confirmation callback: what happened, where to send the shopper, and what to tell them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOutcome {
    /// The local order increment id derived from the gateway order id.
    pub order_id: String,
    pub resolution: CaptureResolution,
    pub redirect: RedirectTarget,
    /// User-visible message describing the outcome.
    pub message: String,
    /// Set when the gateway accepted a capture but a local save failed afterwards. The order needs manual
    /// reconciliation; the redirect decision stands regardless.
    pub needs_manual_review: bool,
}

/// The result of a processed credit-memo refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundOutcome {
    pub order_id: String,
    /// The reference the refund was submitted under; becomes the payment's new transaction id.
    pub refund_reference: String,
    /// The capture transaction the refund was issued against.
    pub parent_transaction_id: String,
    pub amount: GatewayAmount,
}
