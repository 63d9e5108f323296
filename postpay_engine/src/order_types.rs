use std::fmt::Display;

use chrono::{DateTime, Utc};
use ppg_common::GatewayAmount;
use serde::{Deserialize, Serialize};

//--------------------------------------    GatewayOrderId    --------------------------------------------------------

/// The composite identifier the gateway assigns to an order: `<localOrderIncrementId>-<suffix>`.
///
/// The prefix before the first `-` is the merchant's own order increment id; the suffix is opaque to us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayOrderId(pub String);

impl GatewayOrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The local order increment id embedded in this gateway order id, or `None` if the id does not carry one
    /// (no `-` separator, or an empty prefix).
    pub fn local_order_id(&self) -> Option<&str> {
        match self.0.split_once('-') {
            Some((prefix, _)) if !prefix.is_empty() => Some(prefix),
            _ => None,
        }
    }
}

impl<S: Into<String>> From<S> for GatewayOrderId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl Display for GatewayOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------    GatewayStatus     --------------------------------------------------------

/// The status vocabulary the gateway exposes. Anything we do not recognise is a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    Approved,
    Captured,
    Pending,
    Denied,
}

impl From<&str> for GatewayStatus {
    fn from(value: &str) -> Self {
        match value {
            // "APPROVED" is what the legacy confirmation callback sends in its status parameter.
            "approved" | "APPROVED" => GatewayStatus::Approved,
            "captured" => GatewayStatus::Captured,
            "pending" => GatewayStatus::Pending,
            _ => GatewayStatus::Denied,
        }
    }
}

impl Display for GatewayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayStatus::Approved => write!(f, "approved"),
            GatewayStatus::Captured => write!(f, "captured"),
            GatewayStatus::Pending => write!(f, "pending"),
            GatewayStatus::Denied => write!(f, "denied"),
        }
    }
}

impl GatewayStatus {
    /// Approved and captured orders both warrant a capture call against the gateway.
    pub fn is_capturable(&self) -> bool {
        matches!(self, GatewayStatus::Approved | GatewayStatus::Captured)
    }
}

//--------------------------------------      OrderState      --------------------------------------------------------

/// The platform's canonical "canceled" lifecycle state. When the configured checkout-failure status equals this
/// value, failed orders are cancelled outright instead of merely relabelled.
pub const STATE_CANCELED: &str = "canceled";

/// The conventional post-payment lifecycle state on the platform.
pub const STATE_PROCESSING: &str = "processing";

/// An opaque platform order lifecycle state (`processing`, `canceled`, `closed`, merchant-defined values, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderState(pub String);

impl OrderState {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_canceled(&self) -> bool {
        self.0 == STATE_CANCELED
    }
}

impl<S: Into<String>> From<S> for OrderState {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------        Order         --------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// The merchant's order increment id. This is the prefix of the gateway order id.
    pub increment_id: String,
    /// The order lifecycle state.
    pub state: OrderState,
    /// The order status label. Usually tracks the state, but merchants can configure custom labels.
    pub status: String,
    /// The payment record attached to the order, if any.
    pub payment: Option<Payment>,
    /// Append-only status history.
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
}

impl Order {
    pub fn new(increment_id: impl Into<String>, state: impl Into<OrderState>) -> Self {
        let state = state.into();
        let status = state.to_string();
        Self { increment_id: increment_id.into(), state, status, payment: None, status_history: Vec::new() }
    }

    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payment = Some(payment);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub created_at: DateTime<Utc>,
    pub comment: String,
}

impl StatusHistoryEntry {
    pub fn now(comment: impl Into<String>) -> Self {
        Self { created_at: Utc::now(), comment: comment.into() }
    }
}

//--------------------------------------       Payment        --------------------------------------------------------

/// The payment method codes that belong to this gateway. Events for orders paid any other way are ignored.
pub const POSTPAY_METHODS: [&str; 2] = ["postpay", "postpay_pay_now"];

pub fn is_postpay_method(method: &str) -> bool {
    POSTPAY_METHODS.contains(&method)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    /// The payment method code (`postpay`, `postpay_pay_now`, or anything else the platform supports).
    pub method: String,
    /// The most recent transaction id. After a capture this is the local order id; after a refund it is the
    /// refund reference.
    pub transaction_id: Option<String>,
    /// The transaction this payment's latest transaction descends from (the capture, for refunds).
    pub parent_transaction_id: Option<String>,
    pub is_transaction_closed: bool,
    /// Free-form transaction detail recorded at capture time.
    pub details: Option<TransactionDetails>,
}

impl Payment {
    pub fn for_method(method: impl Into<String>) -> Self {
        Self { method: method.into(), ..Default::default() }
    }
}

/// The raw status string and captured amount returned by the gateway, kept for auditing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub status: String,
    pub amount: GatewayAmount,
}

//--------------------------------------      CreditMemo      --------------------------------------------------------

/// A refund record created against a fulfilled order. Each credit memo triggers at most one gateway refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditMemo {
    pub increment_id: String,
    pub order_increment_id: String,
    pub grand_total: GatewayAmount,
}

//--------------------------------------   Gateway responses  --------------------------------------------------------

/// The gateway's response to a successful capture call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureResponse {
    pub status: String,
    /// Decimal amount as a string, e.g. `"59.99"`.
    pub total_amount: String,
    pub currency: String,
    pub order_id: String,
}

/// The subset of a gateway order record that reconciliation cares about. Everything else the gateway sends back
/// is retained untyped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrderInfo {
    pub status: String,
    #[serde(flatten, default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GatewayOrderInfo {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self { status: status.into(), extra: serde_json::Map::new() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn local_order_id_is_the_prefix_before_the_first_dash() {
        let id = GatewayOrderId::from("1000-ab12");
        assert_eq!(id.local_order_id(), Some("1000"));
        let id = GatewayOrderId::from("1000-ab-12");
        assert_eq!(id.local_order_id(), Some("1000"));
        let id = GatewayOrderId::from("1000-");
        assert_eq!(id.local_order_id(), Some("1000"));
    }

    #[test]
    fn ids_without_a_separator_have_no_local_order_id() {
        assert_eq!(GatewayOrderId::from("1000").local_order_id(), None);
        assert_eq!(GatewayOrderId::from("").local_order_id(), None);
        assert_eq!(GatewayOrderId::from("-ab12").local_order_id(), None);
    }

    #[test]
    fn status_vocabulary() {
        assert_eq!(GatewayStatus::from("approved"), GatewayStatus::Approved);
        assert_eq!(GatewayStatus::from("APPROVED"), GatewayStatus::Approved);
        assert_eq!(GatewayStatus::from("captured"), GatewayStatus::Captured);
        assert_eq!(GatewayStatus::from("pending"), GatewayStatus::Pending);
        assert_eq!(GatewayStatus::from("denied"), GatewayStatus::Denied);
        // Everything unrecognised is treated as a denial, including case variants we do not expect.
        assert_eq!(GatewayStatus::from("CAPTURED"), GatewayStatus::Denied);
        assert_eq!(GatewayStatus::from("expired"), GatewayStatus::Denied);
        assert_eq!(GatewayStatus::from(""), GatewayStatus::Denied);
    }

    #[test]
    fn capturable_statuses() {
        assert!(GatewayStatus::Approved.is_capturable());
        assert!(GatewayStatus::Captured.is_capturable());
        assert!(!GatewayStatus::Pending.is_capturable());
        assert!(!GatewayStatus::Denied.is_capturable());
    }

    #[test]
    fn postpay_method_membership() {
        assert!(is_postpay_method("postpay"));
        assert!(is_postpay_method("postpay_pay_now"));
        assert!(!is_postpay_method("checkmo"));
        assert!(!is_postpay_method("POSTPAY"));
    }
}
