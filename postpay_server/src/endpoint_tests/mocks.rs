use mockall::mock;
use postpay_engine::{
    order_types::{CaptureResponse, GatewayOrderId, GatewayOrderInfo, Order, OrderState, Payment},
    traits::{GatewayAdapter, GatewayError, OrderStore, OrderStoreError},
};
use ppg_common::GatewayAmount;

mock! {
    pub OrderManager {}
    impl OrderStore for OrderManager {
        async fn fetch_order_by_increment_id(&self, increment_id: &str) -> Result<Option<Order>, OrderStoreError>;
        async fn update_payment(&self, increment_id: &str, payment: Payment) -> Result<(), OrderStoreError>;
        async fn set_order_state(&self, increment_id: &str, state: &OrderState, status: &str, comment: &str) -> Result<Order, OrderStoreError>;
        async fn cancel_order(&self, increment_id: &str, comment: &str) -> Result<Order, OrderStoreError>;
        async fn mark_refund_processed(&self, creditmemo_id: &str) -> Result<bool, OrderStoreError>;
        async fn send_order_email(&self, increment_id: &str) -> Result<bool, OrderStoreError>;
    }
}

mock! {
    pub Gateway {}
    impl GatewayAdapter for Gateway {
        async fn capture(&self, order_id: &GatewayOrderId) -> Result<CaptureResponse, GatewayError>;
        async fn refund(&self, transaction_id: &str, refund_reference: &str, amount: GatewayAmount) -> Result<(), GatewayError>;
        async fn get_single_order(&self, order_id: &GatewayOrderId) -> Result<GatewayOrderInfo, GatewayError>;
    }
}
