//! Webhook authenticity and dispatch. The processor signs the exact
//! notification URL concatenated with the raw body; anything that does not
//! verify is rejected before the body is even parsed.

use {
    crate::domain::error::GatewayError,
    base64::{Engine, engine::general_purpose::STANDARD as BASE64},
    hmac::{Hmac, Mac},
    serde::Deserialize,
    sha2::Sha256,
};

type HmacSha256 = Hmac<Sha256>;

/// Base64-encoded HMAC-SHA256 over `notification_url + body`, compared in
/// constant time. The URL comes from configuration, never from the inbound
/// request, so forwarded Host headers cannot influence the check.
pub fn verify_signature(
    signature_key: &str,
    notification_url: &str,
    body: &str,
    signature: &str,
) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(signature_key.as_bytes()) else {
        return false;
    };
    mac.update(notification_url.as_bytes());
    mac.update(body.as_bytes());
    let expected = BASE64.encode(mac.finalize().into_bytes());
    secure_eq(expected.as_bytes(), signature.trim().as_bytes())
}

fn secure_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0_u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Parsed event notification. `type` is a free-form tag; the payload mirrors
/// whatever resource changed and is only interpreted per known type.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

pub fn parse_event(body: &str) -> Result<WebhookEvent, GatewayError> {
    Ok(serde_json::from_str(body)?)
}

/// What the receiver did with a verified event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    PaymentUpdated { payment_status: Option<String> },
    Ignored { event_type: String },
}

/// Branch on event type. Dispatch is stateless, so redelivered or reordered
/// events are safe; any stateful handler added here must keep that property.
pub fn dispatch(event: &WebhookEvent) -> Dispatched {
    match event.event_type.as_str() {
        "payment.updated" => {
            let payment_status = event
                .data
                .pointer("/object/payment/status")
                .and_then(|v| v.as_str())
                .map(str::to_owned);
            Dispatched::PaymentUpdated { payment_status }
        }
        other => Dispatched::Ignored {
            event_type: other.to_string(),
        },
    }
}
