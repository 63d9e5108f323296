use std::fmt::Display;

use postpay_engine::order_types::CreditMemo;
use serde::{Deserialize, Serialize};

/// Query parameters of the gateway's confirmation callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationParams {
    /// The gateway order id, `<localOrderIncrementId>-<suffix>`.
    pub order_id: Option<String>,
    /// The status the legacy callback claims for the order. Advisory only; the live gateway lookup wins.
    pub status: Option<String>,
}

/// Body of the platform's credit-memo-created webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditMemoEvent {
    pub creditmemo: CreditMemo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
