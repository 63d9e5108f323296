use std::fmt::Debug;

use log::*;
use ppg_common::GatewayAmount;

use crate::{
    events::{EventProducers, OrderConfirmedEvent, OrderDeclinedEvent},
    helpers::refund_reference,
    order_types::{
        is_postpay_method,
        CreditMemo,
        GatewayOrderId,
        GatewayStatus,
        Order,
        OrderState,
        TransactionDetails,
        STATE_CANCELED,
        STATE_PROCESSING,
    },
    reconciliation::{
        CaptureOutcome,
        CaptureResolution,
        ReconciliationError,
        RedirectTarget,
        RefundOutcome,
        TerminalDisposition,
    },
    traits::{GatewayAdapter, GatewayError, OrderStore},
};

/// The platform status identifiers that terminal transitions map onto.
#[derive(Debug, Clone)]
pub struct ReconciliationConfig {
    /// Orders with a successful capture are moved to this state and status.
    pub checkout_success_status: OrderState,
    /// Orders with a denied or failed payment are moved to this state and status. When this equals the
    /// platform's canonical `canceled` state the order is cancelled outright instead.
    pub checkout_failure_status: OrderState,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            checkout_success_status: OrderState::from(STATE_PROCESSING),
            checkout_failure_status: OrderState::from(STATE_CANCELED),
        }
    }
}

/// `ReconciliationApi` is the primary API for driving orders to a terminal state in response to gateway
/// confirmation callbacks and platform credit-memo events.
pub struct ReconciliationApi<S, G> {
    store: S,
    gateway: G,
    config: ReconciliationConfig,
    producers: EventProducers,
}

impl<S, G> Debug for ReconciliationApi<S, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReconciliationApi")
    }
}

impl<S, G> ReconciliationApi<S, G> {
    pub fn new(store: S, gateway: G, config: ReconciliationConfig, producers: EventProducers) -> Self {
        Self { store, gateway, config, producers }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S, G> ReconciliationApi<S, G>
where
    S: OrderStore,
    G: GatewayAdapter,
{
    /// Handle a gateway confirmation callback.
    ///
    /// The definitive gateway status decides what happens to the order:
    ///
    /// | Status              | Gateway call | Order transition                        | Redirect               |
    /// |---------------------|--------------|-----------------------------------------|------------------------|
    /// | approved / captured | `capture`    | success; failure if the capture is rejected | success page; cart on rejection |
    /// | pending             | none         | none                                    | success page           |
    /// | anything else       | none         | failure                                 | cart                   |
    ///
    /// The status comes from a live `get_single_order` lookup. The caller-supplied status (the legacy callback's
    /// `status` query parameter) is only trusted when the lookup itself fails, since a redirect parameter is
    /// forgeable and the lookup is not.
    ///
    /// Re-delivered callbacks are idempotent: once the order is in a terminal state, no gateway call is made and
    /// no transition happens; the outcome only reports where to send the shopper.
    ///
    /// A persistence failure *after* a successful capture does not fail the call. It is logged, the outcome's
    /// `needs_manual_review` flag is set, and the success redirect stands: the customer has been charged, so
    /// sending them back to the cart would invite a double payment.
    pub async fn confirm_order(
        &self,
        gateway_order_id: &GatewayOrderId,
        caller_status: Option<&str>,
    ) -> Result<CaptureOutcome, ReconciliationError> {
        let order_id = gateway_order_id
            .local_order_id()
            .ok_or_else(|| ReconciliationError::MalformedIdentifier(gateway_order_id.to_string()))?;
        debug!("🔁️💳️ Confirmation callback received for order {order_id} ({gateway_order_id})");
        let order = self
            .store
            .fetch_order_by_increment_id(order_id)
            .await?
            .ok_or_else(|| ReconciliationError::OrderNotFound(order_id.to_string()))?;
        if let Some(outcome) = self.already_finalized(&order) {
            return Ok(outcome);
        }
        let raw_status = self.resolve_status(gateway_order_id, caller_status).await?;
        match GatewayStatus::from(raw_status.as_str()) {
            GatewayStatus::Approved | GatewayStatus::Captured => self.capture_order(gateway_order_id, order).await,
            GatewayStatus::Pending => {
                info!("🔁️💳️ Order {} is still pending at the gateway. Leaving it untouched.", order.increment_id);
                Ok(CaptureOutcome {
                    order_id: order.increment_id.clone(),
                    resolution: CaptureResolution::Pending,
                    redirect: RedirectTarget::OrderSuccess,
                    message: format!(
                        "Your Postpay payment for order {} is still pending and will be finalized once the gateway \
                         confirms it.",
                        order.increment_id
                    ),
                    needs_manual_review: false,
                })
            },
            GatewayStatus::Denied => self.decline_order(order, raw_status).await,
        }
    }

    /// Apply a terminal status to an order.
    ///
    /// * `Success` sets both state and status to the configured checkout-success value, appends the comment, and
    ///   announces the order on the confirmed-order hook once the save has gone through.
    /// * `Failure` cancels the order outright when the configured checkout-failure value is the platform's
    ///   canonical `canceled` state (prefixing the comment with `"Canceled Order, due to: "`); otherwise it sets
    ///   state and status to the failure value with the comment as-is.
    ///
    /// A save failure is returned to the caller, never retried here.
    pub async fn apply_terminal_status(
        &self,
        increment_id: &str,
        disposition: TerminalDisposition,
        comment: &str,
    ) -> Result<Order, ReconciliationError> {
        match disposition {
            TerminalDisposition::Success => {
                let state = self.config.checkout_success_status.clone();
                let order = self.store.set_order_state(increment_id, &state, state.as_str(), comment).await?;
                self.call_order_confirmed_hook(&order).await;
                Ok(order)
            },
            TerminalDisposition::Failure => {
                let failure = self.config.checkout_failure_status.clone();
                let order = if failure.is_canceled() {
                    let comment = format!("Canceled Order, due to: {comment}");
                    self.store.cancel_order(increment_id, &comment).await?
                } else {
                    self.store.set_order_state(increment_id, &failure, failure.as_str(), comment).await?
                };
                self.call_order_declined_hook(&order, comment).await;
                Ok(order)
            },
        }
    }

    /// React to a credit memo being created against an order.
    ///
    /// Returns `Ok(None)` when the event is not ours to handle: the order has no payment, was not paid through
    /// this gateway, or the memo has already been refunded (re-delivered event). Otherwise a refund for the
    /// memo's grand total is issued against the payment's capture transaction, and the payment record is updated
    /// with the refund reference and closed.
    ///
    /// Refund failures are not recovered here; they propagate to the event dispatcher.
    pub async fn refund_credit_memo(&self, memo: &CreditMemo) -> Result<Option<RefundOutcome>, ReconciliationError> {
        debug!("🔁️💸️ Credit memo {} created for order {}", memo.increment_id, memo.order_increment_id);
        let order = self
            .store
            .fetch_order_by_increment_id(&memo.order_increment_id)
            .await?
            .ok_or_else(|| ReconciliationError::OrderNotFound(memo.order_increment_id.clone()))?;
        let Some(payment) = order.payment else {
            debug!("🔁️💸️ Order {} has no payment record. Ignoring credit memo.", order.increment_id);
            return Ok(None);
        };
        if !is_postpay_method(&payment.method) {
            debug!(
                "🔁️💸️ Order {} was paid with '{}', not through Postpay. Ignoring credit memo.",
                order.increment_id, payment.method
            );
            return Ok(None);
        }
        // Mark before calling out: a re-delivered event must never refund twice, so a refund that fails after
        // this point needs manual follow-up rather than an automatic retry.
        if !self.store.mark_refund_processed(&memo.increment_id).await? {
            warn!("🔁️💸️ Credit memo {} has already been refunded. Ignoring the re-delivered event.", memo.increment_id);
            return Ok(None);
        }
        let parent = payment
            .transaction_id
            .clone()
            .ok_or_else(|| ReconciliationError::NoCaptureTransaction(order.increment_id.clone()))?;
        let reference = refund_reference(&order.increment_id);
        debug!("🔁️💸️ Refunding {} against transaction {parent} under reference {reference}", memo.grand_total);
        self.gateway.refund(&parent, &reference, memo.grand_total).await?;
        let mut payment = payment;
        payment.parent_transaction_id = Some(parent.clone());
        payment.transaction_id = Some(reference.clone());
        payment.is_transaction_closed = true;
        self.store.update_payment(&order.increment_id, payment).await?;
        info!("🔁️💸️ Refunded {} for order {} (credit memo {}).", memo.grand_total, order.increment_id, memo.increment_id);
        Ok(Some(RefundOutcome {
            order_id: order.increment_id,
            refund_reference: reference,
            parent_transaction_id: parent,
            amount: memo.grand_total,
        }))
    }

    /// Resolve the authoritative gateway status for the order, returning the raw status string.
    async fn resolve_status(
        &self,
        gateway_order_id: &GatewayOrderId,
        caller_status: Option<&str>,
    ) -> Result<String, ReconciliationError> {
        match self.gateway.get_single_order(gateway_order_id).await {
            Ok(info) => {
                debug!("🔁️💳️ Gateway reports status '{}' for {gateway_order_id}", info.status);
                Ok(info.status)
            },
            Err(e) => match caller_status {
                Some(status) => {
                    warn!(
                        "🔁️💳️ Status lookup for {gateway_order_id} failed ({e}). Falling back to the caller-supplied \
                         status '{status}'."
                    );
                    Ok(status.to_string())
                },
                None => Err(e.into()),
            },
        }
    }

    async fn capture_order(
        &self,
        gateway_order_id: &GatewayOrderId,
        order: Order,
    ) -> Result<CaptureOutcome, ReconciliationError> {
        let order_id = order.increment_id.clone();
        match self.gateway.capture(gateway_order_id).await {
            Ok(response) => {
                let amount = response.total_amount.parse::<GatewayAmount>().map_err(|e| {
                    error!(
                        "🔁️💳️ Capture for order {order_id} succeeded at the gateway, but its amount field would not \
                         parse: {e}. Flag this order for manual reconciliation."
                    );
                    ReconciliationError::InvalidAmount(response.total_amount.clone())
                })?;
                let mut needs_manual_review = false;
                let mut payment = order.payment.clone().unwrap_or_default();
                payment.transaction_id = Some(order_id.clone());
                payment.is_transaction_closed = true;
                payment.details = Some(TransactionDetails { status: response.status.clone(), amount });
                if let Err(e) = self.store.update_payment(&order_id, payment).await {
                    error!(
                        "🔁️💳️ Capture for order {order_id} succeeded at the gateway, but saving the payment failed: \
                         {e}. Flag this order for manual reconciliation."
                    );
                    needs_manual_review = true;
                }
                let comment = format!(
                    "Postpay capture complete. {amount} {} received in transaction {order_id}.",
                    response.currency
                );
                let message =
                    match self.apply_terminal_status(&order_id, TerminalDisposition::Success, &comment).await {
                        Ok(_) => format!("Your order Id {order_id} was created."),
                        Err(e) => {
                            error!(
                                "🔁️💳️ Capture for order {order_id} succeeded at the gateway, but the status \
                                 transition failed: {e}. Flag this order for manual reconciliation."
                            );
                            needs_manual_review = true;
                            format!("Unable to save order. Id {order_id}. {e}")
                        },
                    };
                info!("🔁️💳️ Captured {amount} {} for order {order_id}.", response.currency);
                Ok(CaptureOutcome {
                    resolution: CaptureResolution::Captured {
                        amount,
                        currency: response.currency,
                        transaction_id: order_id.clone(),
                    },
                    order_id,
                    redirect: RedirectTarget::OrderSuccess,
                    message,
                    needs_manual_review,
                })
            },
            Err(GatewayError::Rejected { code, message: gateway_message }) => {
                warn!("🔁️💳️ Gateway rejected capture for order {order_id}. Code: {code}. {gateway_message}");
                let comment = format!("Capture failed at the gateway. Code: {code}.");
                let message = match self.apply_terminal_status(&order_id, TerminalDisposition::Failure, &comment).await
                {
                    Ok(_) => format!("Capture error. Id {order_id}. Code: {code}."),
                    Err(e) => {
                        error!("🔁️💳️ Could not save the failure state for order {order_id}. {e}");
                        format!("Unable to save order. Id {order_id}. {e}")
                    },
                };
                Ok(CaptureOutcome {
                    order_id,
                    resolution: CaptureResolution::CaptureFailed { code },
                    redirect: RedirectTarget::Cart,
                    message,
                    needs_manual_review: false,
                })
            },
            // A transport failure says nothing about the payment, so the order must not be finalized on it.
            Err(e @ GatewayError::Unreachable(_)) => Err(e.into()),
        }
    }

    async fn decline_order(&self, order: Order, raw_status: String) -> Result<CaptureOutcome, ReconciliationError> {
        let order_id = order.increment_id.clone();
        warn!("🔁️💳️ Postpay denied the transaction for order {order_id} (status: '{raw_status}').");
        let message = match self.apply_terminal_status(&order_id, TerminalDisposition::Failure, "Denied Transaction").await
        {
            Ok(_) => format!("Unable to proceed with the Postpay payment for order {order_id}. Status: {raw_status}."),
            Err(e) => {
                error!("🔁️💳️ Could not save the failure state for order {order_id}. {e}");
                format!("Unable to save order. Id {order_id}. {e}")
            },
        };
        Ok(CaptureOutcome {
            order_id,
            resolution: CaptureResolution::Denied { status: raw_status },
            redirect: RedirectTarget::Cart,
            message,
            needs_manual_review: false,
        })
    }

    /// The capture-replay guard: a terminal order is never captured or transitioned again.
    fn already_finalized(&self, order: &Order) -> Option<CaptureOutcome> {
        let success = order.state == self.config.checkout_success_status;
        let failure = order.state == self.config.checkout_failure_status || order.state.is_canceled();
        if !success && !failure {
            return None;
        }
        info!(
            "🔁️💳️ Confirmation callback for order {} replayed after the order reached state '{}'. Ignoring.",
            order.increment_id, order.state
        );
        Some(CaptureOutcome {
            order_id: order.increment_id.clone(),
            resolution: CaptureResolution::AlreadyFinalized { state: order.state.clone() },
            redirect: if success { RedirectTarget::OrderSuccess } else { RedirectTarget::Cart },
            message: format!("Order {} has already been finalized.", order.increment_id),
            needs_manual_review: false,
        })
    }

    async fn call_order_confirmed_hook(&self, order: &Order) {
        for emitter in &self.producers.order_confirmed_producer {
            debug!("🔁️📦️ Notifying order-confirmed subscribers");
            emitter.publish_event(OrderConfirmedEvent::new(order.clone())).await;
        }
    }

    async fn call_order_declined_hook(&self, order: &Order, reason: &str) {
        for emitter in &self.producers.order_declined_producer {
            debug!("🔁️📦️ Notifying order-declined subscribers");
            emitter.publish_event(OrderDeclinedEvent::new(order.clone(), reason)).await;
        }
    }
}
