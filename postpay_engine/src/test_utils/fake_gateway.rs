use std::sync::{Arc, Mutex};

use ppg_common::GatewayAmount;

use crate::{
    order_types::{CaptureResponse, GatewayOrderId, GatewayOrderInfo},
    traits::{GatewayAdapter, GatewayError},
};

/// A scripted [`GatewayAdapter`] that records every call made against it.
///
/// Responses are configured with the builder methods. Anything left unconfigured behaves as if the gateway were
/// down: the call returns [`GatewayError::Unreachable`]. Clones share their script and call log.
#[derive(Clone, Default)]
pub struct FakeGateway {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    order_status: Option<String>,
    capture: Option<Result<CaptureResponse, GatewayError>>,
    refund: Option<GatewayError>,
    capture_calls: u32,
    lookup_calls: u32,
    refund_calls: Vec<(String, String, f64)>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// `get_single_order` will report this status.
    pub fn reporting_status(self, status: impl Into<String>) -> Self {
        self.lock().order_status = Some(status.into());
        self
    }

    /// `capture` will succeed with the given response fields.
    pub fn capturing(
        self,
        status: impl Into<String>,
        total_amount: impl Into<String>,
        currency: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        self.lock().capture = Some(Ok(CaptureResponse {
            status: status.into(),
            total_amount: total_amount.into(),
            currency: currency.into(),
            order_id: order_id.into(),
        }));
        self
    }

    /// `capture` will fail with a gateway rejection.
    pub fn rejecting_capture(self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.lock().capture = Some(Err(GatewayError::Rejected { code: code.into(), message: message.into() }));
        self
    }

    /// `refund` will fail with a gateway rejection. Refunds succeed by default.
    pub fn rejecting_refund(self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.lock().refund = Some(GatewayError::Rejected { code: code.into(), message: message.into() });
        self
    }

    pub fn capture_calls(&self) -> u32 {
        self.lock().capture_calls
    }

    pub fn lookup_calls(&self) -> u32 {
        self.lock().lookup_calls
    }

    /// Every refund issued, as `(transaction_id, refund_reference, amount)` tuples in call order.
    pub fn refund_calls(&self) -> Vec<(String, String, f64)> {
        self.lock().refund_calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("fake gateway lock poisoned")
    }
}

impl GatewayAdapter for FakeGateway {
    async fn capture(&self, _order_id: &GatewayOrderId) -> Result<CaptureResponse, GatewayError> {
        let mut inner = self.lock();
        inner.capture_calls += 1;
        inner
            .capture
            .clone()
            .unwrap_or_else(|| Err(GatewayError::Unreachable("no capture response scripted".to_string())))
    }

    async fn refund(
        &self,
        transaction_id: &str,
        refund_reference: &str,
        amount: GatewayAmount,
    ) -> Result<(), GatewayError> {
        let mut inner = self.lock();
        inner.refund_calls.push((transaction_id.to_string(), refund_reference.to_string(), amount.value()));
        match &inner.refund {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn get_single_order(&self, _order_id: &GatewayOrderId) -> Result<GatewayOrderInfo, GatewayError> {
        let mut inner = self.lock();
        inner.lookup_calls += 1;
        match &inner.order_status {
            Some(status) => Ok(GatewayOrderInfo::with_status(status.clone())),
            None => Err(GatewayError::Unreachable("no order status scripted".to_string())),
        }
    }
}
