use thiserror::Error;

use crate::traits::{GatewayError, OrderStoreError};

#[derive(Debug, Clone, Error)]
pub enum ReconciliationError {
    /// The gateway order id carries no local order id (`<localOrderId>-<suffix>` format violated).
    #[error("Malformed gateway order id: {0}")]
    MalformedIdentifier(String),
    #[error("Order {0} does not exist")]
    OrderNotFound(String),
    #[error("{0}")]
    Gateway(#[from] GatewayError),
    #[error("Order persistence failed. {0}")]
    Persistence(#[from] OrderStoreError),
    /// The gateway reported a successful capture but its amount field would not parse.
    #[error("The gateway returned an unparseable amount: {0}")]
    InvalidAmount(String),
    /// A refund was requested for an order whose payment has no capture transaction recorded.
    #[error("Order {0} has no capture transaction to refund against")]
    NoCaptureTransaction(String),
}
