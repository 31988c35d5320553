pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;

use {
    crate::config::{PaymentLinkConfig, WebhookConfig},
    crate::domain::processor::ProcessorClient,
    std::sync::Arc,
};

/// Shared per-process state. The processor handle is the only long-lived
/// resource; it is injected so tests can substitute a fake client.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<dyn ProcessorClient>,
    pub webhooks: WebhookConfig,
    pub links: PaymentLinkConfig,
}
