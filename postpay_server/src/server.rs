use std::{future::Future, pin::Pin, time::Duration};

use actix_web::{http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use postpay_engine::{
    events::{EventHandlers, EventHooks, OrderConfirmedEvent},
    GatewayAdapter,
    MemoryOrderStore,
    NullGatewayAdapter,
    OrderStore,
    ReconciliationApi,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{confirmation, creditmemo_webhook, health},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    if config.merchant_id.is_empty() {
        warn!("🚀️ No merchant id is configured. The server will run, but no live gateway adapter can be wired up.");
    }
    // Demo wiring: an empty in-memory store and a gateway stub that refuses every call. Real deployments construct
    // the server with their own store and adapter via `create_server_instance`.
    let store = MemoryOrderStore::new();
    let gateway = NullGatewayAdapter;
    let srv = create_server_instance(config, store, gateway)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance<S, G>(
    config: ServerConfig,
    store: S,
    gateway: G,
) -> Result<actix_web::dev::Server, ServerError>
where
    S: OrderStore + Clone + Send + Sync + 'static,
    G: GatewayAdapter + Clone + Send + Sync + 'static,
{
    let srv = HttpServer::new(move || {
        let mut hooks = EventHooks::default();
        if !config.disable_order_emails {
            let email_store = store.clone();
            hooks.on_order_confirmed(move |ev: OrderConfirmedEvent| {
                let store = email_store.clone();
                Box::pin(async move {
                    // Best effort: a failed email must never affect the order itself.
                    match store.send_order_email(&ev.order.increment_id).await {
                        Ok(true) => info!("📧️ Confirmation email queued for order {}.", ev.order.increment_id),
                        Ok(false) => debug!("📧️ No confirmation email configured for order {}.", ev.order.increment_id),
                        Err(e) => {
                            warn!("📧️ Could not queue the confirmation email for order {}. {e}", ev.order.increment_id)
                        },
                    }
                }) as Pin<Box<dyn Future<Output = ()> + Send>>
            });
        }
        let handlers = EventHandlers::new(10, hooks);
        let producers = handlers.producers();
        handlers.start_handlers();
        let api = ReconciliationApi::new(store.clone(), gateway.clone(), config.reconciliation.clone(), producers);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ppg::access_log"))
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(config.redirects.clone()))
            .service(health)
            .service(
                web::scope("/postpay")
                    .route("/confirmation", web::get().to(confirmation::<S, G>))
                    .route("/webhook/creditmemo_create", web::post().to(creditmemo_webhook::<S, G>)),
            )
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
