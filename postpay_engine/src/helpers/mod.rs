use uuid::Uuid;

/// Generate the reference under which a refund is submitted to the gateway.
///
/// The gateway requires `<orderIncrementId>-<suffix>`; the suffix is a v4 UUID so references stay unique across
/// concurrent server instances, not merely within one process.
pub fn refund_reference(order_increment_id: &str) -> String {
    format!("{order_increment_id}-{}", Uuid::new_v4().simple())
}
