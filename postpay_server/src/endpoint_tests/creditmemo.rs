use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use postpay_engine::{
    events::EventProducers,
    order_types::{Order, Payment},
    test_utils::FakeGateway,
    GatewayAdapter,
    MemoryOrderStore,
    OrderStore,
    ReconciliationApi,
    ReconciliationConfig,
};
use serde_json::json;

use crate::{data_objects::JsonResponse, routes::creditmemo_webhook};

async fn post_creditmemo<S, G>(store: S, gateway: G, body: serde_json::Value) -> (StatusCode, String)
where
    S: OrderStore + 'static,
    G: GatewayAdapter + 'static,
{
    let _ = env_logger::try_init().ok();
    let api = ReconciliationApi::new(store, gateway, ReconciliationConfig::default(), EventProducers::default());
    let app = App::new()
        .app_data(web::Data::new(api))
        .route("/postpay/webhook/creditmemo_create", web::post().to(creditmemo_webhook::<S, G>));
    let service = test::init_service(app).await;
    let req = TestRequest::post().uri("/postpay/webhook/creditmemo_create").set_json(body).to_request();
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}

fn refundable_order(id: &str, txid: &str) -> Order {
    let mut payment = Payment::for_method("postpay");
    payment.transaction_id = Some(txid.to_string());
    Order::new(id, "processing").with_payment(payment)
}

fn memo_event(memo_id: &str, order_id: &str, total: f64) -> serde_json::Value {
    json!({ "creditmemo": { "increment_id": memo_id, "order_increment_id": order_id, "grand_total": total } })
}

#[actix_web::test]
async fn credit_memos_trigger_a_refund() {
    let store = MemoryOrderStore::with_orders([refundable_order("1000", "TX1")]);
    let gateway = FakeGateway::new();

    let (status, body) = post_creditmemo(store, gateway.clone(), memo_event("cm-1", "1000", 20.0)).await;

    assert_eq!(status, StatusCode::OK);
    let response: JsonResponse = serde_json::from_str(&body).unwrap();
    assert!(response.success);
    assert!(response.message.contains("Refund 1000-"));
    let calls = gateway.refund_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "TX1");
    assert_eq!(calls[0].2, 20.0);
}

#[actix_web::test]
async fn non_postpay_orders_are_acknowledged_without_a_refund() {
    let store = MemoryOrderStore::with_orders([Order::new("1000", "processing")
        .with_payment(Payment::for_method("checkmo"))]);
    let gateway = FakeGateway::new();

    let (status, body) = post_creditmemo(store, gateway.clone(), memo_event("cm-1", "1000", 20.0)).await;

    assert_eq!(status, StatusCode::OK);
    let response: JsonResponse = serde_json::from_str(&body).unwrap();
    assert!(response.success);
    assert!(gateway.refund_calls().is_empty());
}

#[actix_web::test]
async fn redelivered_webhooks_refund_only_once() {
    let store = MemoryOrderStore::with_orders([refundable_order("1000", "TX1")]);
    let gateway = FakeGateway::new();

    let (first, _) = post_creditmemo(store.clone(), gateway.clone(), memo_event("cm-1", "1000", 20.0)).await;
    let (replay, body) = post_creditmemo(store, gateway.clone(), memo_event("cm-1", "1000", 20.0)).await;

    // Both deliveries are acknowledged so the platform stops retrying, but only one refund goes out.
    assert_eq!(first, StatusCode::OK);
    assert_eq!(replay, StatusCode::OK);
    let response: JsonResponse = serde_json::from_str(&body).unwrap();
    assert!(response.success);
    assert_eq!(gateway.refund_calls().len(), 1);
}

#[actix_web::test]
async fn failed_refunds_are_reported_but_still_acknowledged() {
    let store = MemoryOrderStore::with_orders([refundable_order("1000", "TX1")]);
    let gateway = FakeGateway::new().rejecting_refund("refund_window_closed", "Too late");

    let (status, body) = post_creditmemo(store, gateway, memo_event("cm-1", "1000", 20.0)).await;

    assert_eq!(status, StatusCode::OK);
    let response: JsonResponse = serde_json::from_str(&body).unwrap();
    assert!(!response.success);
    assert!(response.message.contains("refund_window_closed"));
}

#[actix_web::test]
async fn memos_for_unknown_orders_are_reported() {
    let (status, body) =
        post_creditmemo(MemoryOrderStore::new(), FakeGateway::new(), memo_event("cm-1", "404", 20.0)).await;

    assert_eq!(status, StatusCode::OK);
    let response: JsonResponse = serde_json::from_str(&body).unwrap();
    assert!(!response.success);
}

#[actix_web::test]
async fn malformed_webhook_bodies_are_rejected() {
    let (status, _) =
        post_creditmemo(MemoryOrderStore::new(), FakeGateway::new(), json!({ "creditmemo": { "increment_id": 7 } }))
            .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
