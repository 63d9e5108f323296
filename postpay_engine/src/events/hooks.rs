use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, OrderConfirmedEvent, OrderDeclinedEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub order_confirmed_producer: Vec<EventProducer<OrderConfirmedEvent>>,
    pub order_declined_producer: Vec<EventProducer<OrderDeclinedEvent>>,
}

pub struct EventHandlers {
    pub on_order_confirmed: Option<EventHandler<OrderConfirmedEvent>>,
    pub on_order_declined: Option<EventHandler<OrderDeclinedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_order_confirmed = hooks.on_order_confirmed.map(|f| EventHandler::new(buffer_size, f));
        let on_order_declined = hooks.on_order_declined.map(|f| EventHandler::new(buffer_size, f));
        Self { on_order_confirmed, on_order_declined }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_order_confirmed {
            result.order_confirmed_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_order_declined {
            result.order_declined_producer.push(handler.subscribe());
        }
        result
    }

    pub fn start_handlers(self) {
        if let Some(handler) = self.on_order_confirmed {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_order_declined {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_order_confirmed: Option<Handler<OrderConfirmedEvent>>,
    pub on_order_declined: Option<Handler<OrderDeclinedEvent>>,
}

impl EventHooks {
    pub fn on_order_confirmed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderConfirmedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_order_confirmed = Some(Arc::new(f));
        self
    }

    pub fn on_order_declined<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderDeclinedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_order_declined = Some(Arc::new(f));
        self
    }
}
