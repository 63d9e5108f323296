//! Collaborator contracts for the reconciliation engine.
//!
//! The engine owns no infrastructure of its own. Both of its collaborators are consumed as traits:
//!
//! * [`GatewayAdapter`] is the Postpay gateway itself: the capture, refund and order-lookup calls. Transport,
//!   authentication, timeouts and retries all belong to whichever adapter implementation the deployment wires in.
//! * [`OrderStore`] is the hosting platform's order subsystem: loading orders, persisting payment and state
//!   changes, cancelling, and sending the order confirmation email.
//!
//! Both traits use plain `async fn` so they can be implemented without boxing and mocked directly in tests.
mod gateway_adapter;
mod order_store;

pub use gateway_adapter::{GatewayAdapter, GatewayError, NullGatewayAdapter};
pub use order_store::{OrderStore, OrderStoreError};
