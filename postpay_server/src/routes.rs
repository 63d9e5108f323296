//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into a separate
//! module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the order store and gateway adapter, so they are registered with the concrete types
//! spelled out, e.g. `web::get().to(confirmation::<MemoryOrderStore, NullGatewayAdapter>)`.
use actix_web::{get, http::header, web, HttpResponse, Responder};
use log::*;
use postpay_engine::{
    order_types::GatewayOrderId,
    GatewayAdapter,
    OrderStore,
    ReconciliationApi,
    ReconciliationError,
};

use crate::{
    config::RedirectConfig,
    data_objects::{ConfirmationParams, CreditMemoEvent, JsonResponse},
    errors::ServerError,
};

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

/// The gateway's post-checkout confirmation callback.
///
/// Resolves the order through the reconciliation engine and answers with a `303 See Other` pointing the shopper's
/// browser at the configured success or cart URL. The outcome message rides along in the body for clients that do
/// not follow redirects.
pub async fn confirmation<S, G>(
    params: web::Query<ConfirmationParams>,
    api: web::Data<ReconciliationApi<S, G>>,
    redirects: web::Data<RedirectConfig>,
) -> Result<HttpResponse, ServerError>
where
    S: OrderStore,
    G: GatewayAdapter,
{
    let params = params.into_inner();
    let order_id = params.order_id.ok_or_else(|| ServerError::MissingParameter("order_id".to_string()))?;
    trace!("💻️ Received confirmation callback for {order_id}");
    let gateway_order_id = GatewayOrderId::from(order_id);
    let outcome = api.confirm_order(&gateway_order_id, params.status.as_deref()).await?;
    if outcome.needs_manual_review {
        warn!("💻️ Order {} has been flagged for manual reconciliation.", outcome.order_id);
    }
    let url = redirects.url_for(outcome.redirect).to_string();
    debug!("💻️ Redirecting order {} to {url}", outcome.order_id);
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, url))
        .json(JsonResponse { success: !outcome.needs_manual_review, message: outcome.message }))
}

/// The platform's credit-memo-created webhook.
///
/// Responses must always be in the 200 range, otherwise the platform will retry the delivery. A refund that
/// cannot be issued is reported in the body and left for manual follow-up.
pub async fn creditmemo_webhook<S, G>(
    body: web::Json<CreditMemoEvent>,
    api: web::Data<ReconciliationApi<S, G>>,
) -> HttpResponse
where
    S: OrderStore,
    G: GatewayAdapter,
{
    let event = body.into_inner();
    trace!("💸️ Received credit memo webhook for order {}", event.creditmemo.order_increment_id);
    let result = match api.refund_credit_memo(&event.creditmemo).await {
        Ok(Some(outcome)) => {
            info!(
                "💸️ Refunded {} for order {} under reference {}.",
                outcome.amount, outcome.order_id, outcome.refund_reference
            );
            JsonResponse::success(format!("Refund {} issued.", outcome.refund_reference))
        },
        Ok(None) => {
            debug!("💸️ Credit memo {} required no refund.", event.creditmemo.increment_id);
            JsonResponse::success("Nothing to do.")
        },
        Err(e @ ReconciliationError::OrderNotFound(_)) => {
            warn!("💸️ Could not refund credit memo {}. {e}", event.creditmemo.increment_id);
            JsonResponse::failure(e)
        },
        Err(e) => {
            error!(
                "💸️ Refund for credit memo {} failed and needs manual follow-up. {e}",
                event.creditmemo.increment_id
            );
            JsonResponse::failure(e)
        },
    };
    HttpResponse::Ok().json(result)
}
