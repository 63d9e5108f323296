use actix_web::{
    http::{header, StatusCode},
    test,
    test::TestRequest,
    web,
    App,
};
use postpay_engine::{
    events::EventProducers,
    order_types::{Order, Payment},
    test_utils::FakeGateway,
    traits::OrderStoreError,
    GatewayAdapter,
    MemoryOrderStore,
    OrderStore,
    ReconciliationApi,
    ReconciliationConfig,
};

use crate::{
    config::RedirectConfig,
    endpoint_tests::mocks::{MockGateway, MockOrderManager},
    routes::confirmation,
};

async fn get_confirmation<S, G>(store: S, gateway: G, path: &str) -> (StatusCode, Option<String>, String)
where
    S: OrderStore + 'static,
    G: GatewayAdapter + 'static,
{
    let _ = env_logger::try_init().ok();
    let api = ReconciliationApi::new(store, gateway, ReconciliationConfig::default(), EventProducers::default());
    let app = App::new()
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(RedirectConfig::default()))
        .route("/postpay/confirmation", web::get().to(confirmation::<S, G>));
    let service = test::init_service(app).await;
    let req = TestRequest::get().uri(path).to_request();
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let location = res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()).map(String::from);
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, location, body)
}

fn pending_order(id: &str) -> Order {
    Order::new(id, "pending_payment").with_payment(Payment::for_method("postpay"))
}

#[actix_web::test]
async fn captured_orders_redirect_to_the_success_page() {
    let store = MemoryOrderStore::with_orders([pending_order("1000")]);
    let gateway = FakeGateway::new().reporting_status("approved").capturing("captured", "59.99", "USD", "1000-ab12");

    let (status, location, body) =
        get_confirmation(store.clone(), gateway, "/postpay/confirmation?order_id=1000-ab12").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/checkout/onepage/success"));
    assert!(body.contains("was created"));
    assert_eq!(store.order("1000").unwrap().status, "processing");
}

#[actix_web::test]
async fn denied_orders_redirect_to_the_cart() {
    let store = MemoryOrderStore::with_orders([pending_order("1000")]);
    let gateway = FakeGateway::new().reporting_status("denied");

    let (status, location, _) =
        get_confirmation(store.clone(), gateway, "/postpay/confirmation?order_id=1000-ab12").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/checkout/cart"));
    assert!(store.order("1000").unwrap().state.is_canceled());
}

#[actix_web::test]
async fn the_caller_status_stands_in_when_the_lookup_fails() {
    let store = MemoryOrderStore::with_orders([pending_order("1000")]);
    // The legacy callback carries its own status parameter; no lookup response is scripted.
    let gateway = FakeGateway::new().capturing("captured", "59.99", "USD", "1000-ab12");

    let (status, location, _) =
        get_confirmation(store, gateway, "/postpay/confirmation?order_id=1000-ab12&status=APPROVED").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/checkout/onepage/success"));
}

#[actix_web::test]
async fn a_missing_order_id_is_a_bad_request() {
    let (status, _, body) =
        get_confirmation(MemoryOrderStore::new(), FakeGateway::new(), "/postpay/confirmation").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("order_id"));
}

#[actix_web::test]
async fn an_order_id_without_a_local_part_is_a_bad_request() {
    let (status, _, _) =
        get_confirmation(MemoryOrderStore::new(), FakeGateway::new(), "/postpay/confirmation?order_id=1000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_orders_are_not_found() {
    let (status, _, _) =
        get_confirmation(MemoryOrderStore::new(), FakeGateway::new(), "/postpay/confirmation?order_id=1000-ab12")
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn an_unreachable_gateway_is_a_bad_gateway() {
    let store = MemoryOrderStore::with_orders([pending_order("1000")]);
    // No lookup response and no caller status, so the transport failure surfaces.
    let (status, _, _) = get_confirmation(store, FakeGateway::new(), "/postpay/confirmation?order_id=1000-ab12").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn store_failures_are_internal_errors() {
    let mut store = MockOrderManager::new();
    store
        .expect_fetch_order_by_increment_id()
        .returning(|_| Err(OrderStoreError::Backend("database down".to_string())));
    let gateway = MockGateway::new();

    let (status, _, _) = get_confirmation(store, gateway, "/postpay/confirmation?order_id=1000-ab12").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
