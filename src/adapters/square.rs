use {
    crate::domain::{
        customer::{Customer, NewCustomer},
        error::GatewayError,
        money::Money,
        payment::{ChargeRequest, ChargeResult, ChargeStatus},
        processor::{Location, PaymentLink, ProcessorClient, QuickPay},
    },
    async_trait::async_trait,
    serde::{Deserialize, de::DeserializeOwned},
    std::time::Duration,
    uuid::Uuid,
};

/// Pinned API version sent with every request.
const SQUARE_VERSION: &str = "2025-01-23";

/// Thin reqwest wrapper over the Square REST API. Cheap to share: reqwest's
/// `Client` is an `Arc` internally and safe for concurrent use.
pub struct SquareClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SquareClient {
    /// The timeout bounds every call to the processor; expiry surfaces as a
    /// transport error and gets classified like any other processor failure.
    pub fn new(
        base_url: &str,
        access_token: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request
            .bearer_auth(&self.access_token)
            .header("Square-Version", SQUARE_VERSION)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GatewayError::Processor(flatten_errors(status, &text)));
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        self.send(self.http.get(self.endpoint(path))).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, GatewayError> {
        self.send(self.http.post(self.endpoint(path)).json(body)).await
    }
}

/// Square reports failures as `{"errors":[{"code":…,"detail":…}]}`. Collapse
/// them into one line so the classifier sees codes like `CARD_DECLINED`.
fn flatten_errors(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<SquareErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .iter()
            .map(|e| match &e.detail {
                Some(detail) => format!("{}: {detail}", e.code),
                None => e.code.clone(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => format!("HTTP {status}: {body}"),
    }
}

#[async_trait]
impl ProcessorClient for SquareClient {
    async fn search_customers_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<Customer>, GatewayError> {
        let body = serde_json::json!({
            "query": { "filter": { "email_address": { "fuzzy": email } } }
        });
        let response: SearchCustomersResponse =
            self.post_json("/v2/customers/search", &body).await?;
        Ok(response.customers)
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, GatewayError> {
        let body = serde_json::to_value(customer)?;
        let response: CreateCustomerResponse = self.post_json("/v2/customers", &body).await?;
        Ok(response.customer)
    }

    async fn create_payment(&self, charge: &ChargeRequest) -> Result<ChargeResult, GatewayError> {
        let mut body = serde_json::json!({
            "idempotency_key": charge.idempotency_key,
            "source_id": charge.source_id,
            "amount_money": charge.amount_money,
            "customer_id": charge.customer_id,
        });
        if let Some(reference_id) = &charge.reference_id {
            body["reference_id"] = serde_json::json!(reference_id);
        }
        let response: CreatePaymentResponse = self.post_json("/v2/payments", &body).await?;
        Ok(ChargeResult {
            payment_id: response.payment.id,
            status: ChargeStatus::parse(&response.payment.status),
            amount_money: response.payment.amount_money,
        })
    }

    async fn list_locations(&self) -> Result<Vec<Location>, GatewayError> {
        let response: ListLocationsResponse = self.get_json("/v2/locations").await?;
        Ok(response.locations)
    }

    async fn create_payment_link(
        &self,
        quick_pay: &QuickPay,
    ) -> Result<PaymentLink, GatewayError> {
        // The endpoint requires its own idempotency key; link creation is a
        // stateless one-shot, so a fresh key per call is correct here.
        let body = serde_json::json!({
            "idempotency_key": Uuid::new_v4().to_string(),
            "quick_pay": quick_pay,
        });
        let response: CreatePaymentLinkResponse = self
            .post_json("/v2/online-checkout/payment-links", &body)
            .await?;
        Ok(response.payment_link)
    }
}

// ── Wire envelopes ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SquareErrorBody {
    #[serde(default)]
    errors: Vec<SquareErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct SquareErrorDetail {
    code: String,
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchCustomersResponse {
    #[serde(default)]
    customers: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct CreateCustomerResponse {
    customer: Customer,
}

#[derive(Debug, Deserialize)]
struct CreatePaymentResponse {
    payment: PaymentBody,
}

#[derive(Debug, Deserialize)]
struct PaymentBody {
    id: String,
    status: String,
    amount_money: Money,
}

#[derive(Debug, Deserialize)]
struct ListLocationsResponse {
    #[serde(default)]
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct CreatePaymentLinkResponse {
    payment_link: PaymentLink,
}
