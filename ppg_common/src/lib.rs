mod amount;
mod helpers;
mod secret;

pub use amount::{AmountParseError, GatewayAmount};
pub use helpers::parse_boolean_flag;
pub use secret::Secret;
