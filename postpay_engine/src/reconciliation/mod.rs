//! The order reconciliation state machine.
//!
//! Two triggers drive it: the gateway's confirmation callback (capture flow, [`ReconciliationApi::confirm_order`])
//! and the platform's credit-memo-created event (refund flow, [`ReconciliationApi::refund_credit_memo`]). Both
//! map a gateway status onto an order lifecycle transition with idempotent re-delivery handling.
mod api;
mod errors;
mod outcome;

pub use api::{ReconciliationApi, ReconciliationConfig};
pub use errors::ReconciliationError;
pub use outcome::{CaptureOutcome, CaptureResolution, RedirectTarget, RefundOutcome, TerminalDisposition};
