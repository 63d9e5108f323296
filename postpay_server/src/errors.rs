use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use postpay_engine::{GatewayError, ReconciliationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),
    #[error("Malformed gateway order id: {0}")]
    MalformedOrderId(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The payment gateway is unavailable. {0}")]
    GatewayUnavailable(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::MalformedOrderId(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::GatewayUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<ReconciliationError> for ServerError {
    fn from(e: ReconciliationError) -> Self {
        match e {
            ReconciliationError::MalformedIdentifier(id) => Self::MalformedOrderId(id),
            ReconciliationError::OrderNotFound(id) => Self::NoRecordFound(format!("Order {id}")),
            ReconciliationError::Gateway(GatewayError::Unreachable(msg)) => Self::GatewayUnavailable(msg),
            ReconciliationError::Gateway(e @ GatewayError::Rejected { .. }) => Self::BackendError(e.to_string()),
            ReconciliationError::Persistence(e) => Self::BackendError(e.to_string()),
            ReconciliationError::InvalidAmount(amount) => {
                Self::BackendError(format!("The gateway returned an unparseable amount: {amount}"))
            },
            ReconciliationError::NoCaptureTransaction(id) => {
                Self::BackendError(format!("Order {id} has no capture transaction to refund against"))
            },
        }
    }
}
