use {
    crate::domain::{
        error::GatewayError,
        money::{Currency, Money, MoneyAmount},
    },
    std::{env, time::Duration},
};

const SANDBOX_BASE_URL: &str = "https://connect.squareupsandbox.com";
const PRODUCTION_BASE_URL: &str = "https://connect.squareup.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub access_token: String,
    pub base_url: String,
    pub processor_timeout: Duration,
    pub bind_addr: String,
    pub webhooks: WebhookConfig,
    pub links: PaymentLinkConfig,
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub signature_key: String,
    /// Canonical public callback URL; the signature covers exactly this
    /// string plus the body.
    pub notification_url: String,
    /// Explicit opt-out only. Every event accepted without verification is
    /// logged as a warning.
    pub verification_disabled: bool,
}

#[derive(Debug, Clone)]
pub struct PaymentLinkConfig {
    pub name: String,
    pub price: Money,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, GatewayError> {
        let access_token = require("SQUARE_ACCESS_TOKEN")?;
        let base_url = match env::var("SQUARE_ENVIRONMENT")
            .unwrap_or_else(|_| "sandbox".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" => PRODUCTION_BASE_URL.to_string(),
            _ => SANDBOX_BASE_URL.to_string(),
        };

        let webhooks = WebhookConfig {
            signature_key: require("SQUARE_WEBHOOK_SIGNATURE_KEY")?,
            notification_url: require("SQUARE_NOTIFICATION_URL")?,
            verification_disabled: env::var("WEBHOOK_VERIFICATION_DISABLED")
                .map(|v| v == "true")
                .unwrap_or(false),
        };

        let amount = env::var("PAYMENT_LINK_AMOUNT")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(1000);
        let currency = match env::var("PAYMENT_LINK_CURRENCY") {
            Ok(raw) => Currency::try_from(raw.as_str())?,
            Err(_) => Currency::Usd,
        };
        let links = PaymentLinkConfig {
            name: env::var("PAYMENT_LINK_NAME").unwrap_or_else(|_| "Quick Pay".to_string()),
            price: Money::new(MoneyAmount::new(amount)?, currency),
        };

        Ok(Self {
            access_token,
            base_url,
            processor_timeout: Duration::from_secs(
                env::var("PROCESSOR_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            webhooks,
            links,
        })
    }
}

fn require(name: &str) -> Result<String, GatewayError> {
    env::var(name).map_err(|_| GatewayError::Validation(format!("{name} must be set")))
}
