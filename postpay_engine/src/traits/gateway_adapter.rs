use ppg_common::GatewayAmount;
use thiserror::Error;

use crate::order_types::{CaptureResponse, GatewayOrderId, GatewayOrderInfo};

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The gateway processed the request and turned it down. The code is the gateway's own error code and is
    /// surfaced verbatim in order audit comments.
    #[error("The gateway rejected the request. Code: {code}. {message}")]
    Rejected { code: String, message: String },
    /// The gateway could not be reached at all. Unlike a rejection, this says nothing about the order, so callers
    /// must not route the order to a terminal state on the strength of it.
    #[error("Could not reach the payment gateway. {0}")]
    Unreachable(String),
}

impl GatewayError {
    pub fn code(&self) -> &str {
        match self {
            GatewayError::Rejected { code, .. } => code,
            GatewayError::Unreachable(_) => "unreachable",
        }
    }
}

/// The set of gateway calls the reconciliation engine makes.
///
/// Calls are blocking network requests from the engine's point of view; any retry or backoff policy belongs to the
/// implementation, not to the engine.
#[allow(async_fn_in_trait)]
pub trait GatewayAdapter {
    /// Finalise charging the customer for the given (previously authorised) gateway order.
    async fn capture(&self, order_id: &GatewayOrderId) -> Result<CaptureResponse, GatewayError>;

    /// Refund `amount` against the capture transaction `transaction_id`, under the caller-generated
    /// `refund_reference`.
    async fn refund(
        &self,
        transaction_id: &str,
        refund_reference: &str,
        amount: GatewayAmount,
    ) -> Result<(), GatewayError>;

    /// Fetch the gateway's current record for the given order. This is the authoritative status source.
    async fn get_single_order(&self, order_id: &GatewayOrderId) -> Result<GatewayOrderInfo, GatewayError>;
}

/// Stand-in adapter for deployments that have not wired up a live gateway client yet. Every call fails with
/// [`GatewayError::Unreachable`], which keeps orders out of terminal states until a real adapter is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGatewayAdapter;

impl GatewayAdapter for NullGatewayAdapter {
    async fn capture(&self, _order_id: &GatewayOrderId) -> Result<CaptureResponse, GatewayError> {
        Err(GatewayError::Unreachable("No gateway adapter has been configured".to_string()))
    }

    async fn refund(
        &self,
        _transaction_id: &str,
        _refund_reference: &str,
        _amount: GatewayAmount,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::Unreachable("No gateway adapter has been configured".to_string()))
    }

    async fn get_single_order(&self, _order_id: &GatewayOrderId) -> Result<GatewayOrderInfo, GatewayError> {
        Err(GatewayError::Unreachable("No gateway adapter has been configured".to_string()))
    }
}
