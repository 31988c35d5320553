use {
    super::customer::{Customer, NewCustomer},
    super::error::GatewayError,
    super::money::Money,
    super::payment::{ChargeRequest, ChargeResult},
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

/// Processor-side location. Payment links must be anchored to an ACTIVE one.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: String,
    #[serde(default)]
    pub status: String,
}

impl Location {
    pub fn is_active(&self) -> bool {
        self.status == "ACTIVE"
    }
}

/// Fixed-price hosted checkout to create.
#[derive(Debug, Clone, Serialize)]
pub struct QuickPay {
    pub name: String,
    pub price_money: Money,
    pub location_id: String,
}

/// Hosted checkout URLs returned by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentLink {
    pub url: String,
    #[serde(default)]
    pub long_url: String,
}

/// Remote processor surface. One long-lived handle is shared by every
/// in-flight request, so implementations must be safe for concurrent use.
/// All methods are remote calls and may fail with transport errors.
#[async_trait]
pub trait ProcessorClient: Send + Sync {
    /// Fuzzy-match customers by email address.
    async fn search_customers_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<Customer>, GatewayError>;

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, GatewayError>;

    /// Submit a charge. The processor executes at most once per
    /// `idempotency_key`, so resubmitting the same request is safe.
    async fn create_payment(&self, charge: &ChargeRequest) -> Result<ChargeResult, GatewayError>;

    async fn list_locations(&self) -> Result<Vec<Location>, GatewayError>;

    async fn create_payment_link(
        &self,
        quick_pay: &QuickPay,
    ) -> Result<PaymentLink, GatewayError>;
}
