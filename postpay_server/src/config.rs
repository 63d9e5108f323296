use std::env;

use log::*;
use postpay_engine::{reconciliation::RedirectTarget, ReconciliationConfig};
use ppg_common::{parse_boolean_flag, Secret};

const DEFAULT_PPG_HOST: &str = "127.0.0.1";
const DEFAULT_PPG_PORT: u16 = 8370;
const DEFAULT_SUCCESS_REDIRECT_URL: &str = "/checkout/onepage/success";
const DEFAULT_CART_REDIRECT_URL: &str = "/checkout/cart";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The merchant id issued by Postpay. Displayed for diagnostics only; gateway adapters carry their own
    /// credentials.
    pub merchant_id: String,
    /// The Postpay API secret key. Never logged.
    pub secret_key: Secret<String>,
    pub redirects: RedirectConfig,
    pub reconciliation: ReconciliationConfig,
    /// When true, no confirmation email is requested for captured orders.
    pub disable_order_emails: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PPG_HOST.to_string(),
            port: DEFAULT_PPG_PORT,
            merchant_id: String::default(),
            secret_key: Secret::default(),
            redirects: RedirectConfig::default(),
            reconciliation: ReconciliationConfig::default(),
            disable_order_emails: false,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("PPG_HOST").ok().unwrap_or_else(|| DEFAULT_PPG_HOST.into());
        let port = env::var("PPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for PPG_PORT. {e} Using the default, {DEFAULT_PPG_PORT}, instead."
                    );
                    DEFAULT_PPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PPG_PORT);
        let merchant_id = env::var("PPG_MERCHANT_ID").ok().unwrap_or_else(|| {
            warn!("🪛️ PPG_MERCHANT_ID is not set. Set it to your Postpay merchant id.");
            String::default()
        });
        let secret_key = match env::var("PPG_SECRET_KEY") {
            Ok(key) => {
                debug!("🪛️ PPG_SECRET_KEY is set.");
                Secret::new(key)
            },
            Err(_) => {
                warn!("🪛️ PPG_SECRET_KEY is not set. Gateway adapters will not be able to authenticate.");
                Secret::default()
            },
        };
        let redirects = RedirectConfig::from_env_or_default();
        let reconciliation = reconciliation_config_from_env();
        let disable_order_emails = parse_boolean_flag(env::var("PPG_DISABLE_ORDER_EMAILS").ok(), false);
        if disable_order_emails {
            info!("🪛️ Order confirmation emails are disabled.");
        }
        Self { host, port, merchant_id, secret_key, redirects, reconciliation, disable_order_emails }
    }
}

fn reconciliation_config_from_env() -> ReconciliationConfig {
    let mut config = ReconciliationConfig::default();
    if let Ok(status) = env::var("PPG_CHECKOUT_SUCCESS_STATUS") {
        info!("🪛️ Successful orders will be moved to the '{status}' status.");
        config.checkout_success_status = status.into();
    }
    if let Ok(status) = env::var("PPG_CHECKOUT_FAILURE_STATUS") {
        info!("🪛️ Failed orders will be moved to the '{status}' status.");
        config.checkout_failure_status = status.into();
    }
    config
}

/// Where the storefront sends shoppers after a confirmation callback has been resolved.
#[derive(Clone, Debug)]
pub struct RedirectConfig {
    pub success_url: String,
    pub cart_url: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self { success_url: DEFAULT_SUCCESS_REDIRECT_URL.to_string(), cart_url: DEFAULT_CART_REDIRECT_URL.to_string() }
    }
}

impl RedirectConfig {
    pub fn from_env_or_default() -> Self {
        let success_url =
            env::var("PPG_SUCCESS_REDIRECT_URL").ok().unwrap_or_else(|| DEFAULT_SUCCESS_REDIRECT_URL.into());
        let cart_url = env::var("PPG_CART_REDIRECT_URL").ok().unwrap_or_else(|| DEFAULT_CART_REDIRECT_URL.into());
        Self { success_url, cart_url }
    }

    pub fn url_for(&self, target: RedirectTarget) -> &str {
        match target {
            RedirectTarget::OrderSuccess => &self.success_url,
            RedirectTarget::Cart => &self.cart_url,
        }
    }
}
