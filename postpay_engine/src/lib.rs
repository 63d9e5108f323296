//! Postpay Reconciliation Engine
//!
//! This library holds the core logic for reconciling merchant orders against the Postpay payment gateway. It is
//! deliberately thin on infrastructure: the gateway itself and the merchant's order store are both *consumed*
//! capabilities, expressed as traits in the [`mod@traits`] module, and the engine only decides how a gateway status
//! maps onto an order lifecycle transition.
//!
//! The library is divided into three main sections:
//! 1. The collaborator traits ([`mod@traits`]). [`GatewayAdapter`] covers the gateway calls the engine makes
//!    (capture, refund, status lookup) and [`OrderStore`] covers everything the engine asks of the hosting
//!    platform's order subsystem. An in-memory reference store lives in [`mod@stores`].
//! 2. The reconciliation API ([`mod@reconciliation`]). [`ReconciliationApi`] drives the capture flow behind the
//!    gateway's confirmation callback, and the refund flow behind the platform's credit-memo event.
//! 3. A small event hook system ([`mod@events`]). Confirmed orders are announced on an async channel so that
//!    best-effort work (the confirmation email, notably) happens off the reconciliation path.
pub mod events;
pub mod helpers;
pub mod order_types;
pub mod reconciliation;
pub mod stores;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use reconciliation::{
    CaptureOutcome,
    CaptureResolution,
    ReconciliationApi,
    ReconciliationConfig,
    ReconciliationError,
    RedirectTarget,
    RefundOutcome,
    TerminalDisposition,
};
pub use stores::MemoryOrderStore;
pub use traits::{GatewayAdapter, GatewayError, NullGatewayAdapter, OrderStore, OrderStoreError};
