#![allow(dead_code)]

use {
    async_trait::async_trait,
    paybridge::{
        AppState,
        config::{PaymentLinkConfig, WebhookConfig},
        domain::{
            customer::{Customer, NewCustomer},
            error::GatewayError,
            money::{Currency, Money, MoneyAmount},
            payment::{ChargeRequest, ChargeResult, ChargeStatus, PaymentRequest},
            processor::{Location, PaymentLink, ProcessorClient, QuickPay},
        },
    },
    std::sync::{Arc, Mutex},
};

pub const SIGNATURE_KEY: &str = "test-signature-key";
pub const NOTIFICATION_URL: &str = "https://example.com/api/webhooks/square-events";

/// Scripted stand-in for the remote processor. Records every call so tests
/// can assert on call counts and submitted payloads.
pub struct FakeProcessor {
    pub existing_customers: Vec<Customer>,
    pub charge_status: String,
    pub payment_id: String,
    pub locations: Vec<Location>,
    pub fail_search_with: Option<String>,
    pub fail_create_customer_with: Option<String>,
    pub fail_payments_with: Option<String>,
    pub calls: Mutex<Calls>,
}

#[derive(Default)]
pub struct Calls {
    pub searches: Vec<String>,
    pub customer_creates: Vec<NewCustomer>,
    pub charges: Vec<ChargeRequest>,
    pub location_lists: usize,
    pub links: Vec<QuickPay>,
}

impl FakeProcessor {
    /// A processor that completes every charge and has one active location.
    pub fn completing() -> Self {
        Self {
            existing_customers: Vec::new(),
            charge_status: "COMPLETED".to_string(),
            payment_id: "pay_1".to_string(),
            locations: vec![location("loc_1", "ACTIVE")],
            fail_search_with: None,
            fail_create_customer_with: None,
            fail_payments_with: None,
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn with_charge_status(mut self, status: &str) -> Self {
        self.charge_status = status.to_string();
        self
    }

    pub fn with_existing_customer(mut self, id: &str, email: &str) -> Self {
        self.existing_customers.push(Customer {
            id: id.to_string(),
            email_address: Some(email.to_string()),
            given_name: None,
            family_name: None,
        });
        self
    }

    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = locations;
        self
    }

    pub fn failing_search(mut self, error: &str) -> Self {
        self.fail_search_with = Some(error.to_string());
        self
    }

    pub fn failing_create_customer(mut self, error: &str) -> Self {
        self.fail_create_customer_with = Some(error.to_string());
        self
    }

    pub fn failing_payments(mut self, error: &str) -> Self {
        self.fail_payments_with = Some(error.to_string());
        self
    }

    pub fn total_calls(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.searches.len()
            + calls.customer_creates.len()
            + calls.charges.len()
            + calls.location_lists
            + calls.links.len()
    }
}

#[async_trait]
impl ProcessorClient for FakeProcessor {
    async fn search_customers_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<Customer>, GatewayError> {
        self.calls.lock().unwrap().searches.push(email.to_string());
        if let Some(error) = &self.fail_search_with {
            return Err(GatewayError::Processor(error.clone()));
        }
        Ok(self
            .existing_customers
            .iter()
            .filter(|c| c.email_address.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .customer_creates
            .push(customer.clone());
        if let Some(error) = &self.fail_create_customer_with {
            return Err(GatewayError::Processor(error.clone()));
        }
        Ok(Customer {
            id: "cust_new".to_string(),
            email_address: Some(customer.email_address.clone()),
            given_name: customer.given_name.clone(),
            family_name: customer.family_name.clone(),
        })
    }

    async fn create_payment(&self, charge: &ChargeRequest) -> Result<ChargeResult, GatewayError> {
        self.calls.lock().unwrap().charges.push(charge.clone());
        if let Some(error) = &self.fail_payments_with {
            return Err(GatewayError::Processor(error.clone()));
        }
        Ok(ChargeResult {
            payment_id: self.payment_id.clone(),
            status: ChargeStatus::parse(&self.charge_status),
            amount_money: charge.amount_money,
        })
    }

    async fn list_locations(&self) -> Result<Vec<Location>, GatewayError> {
        self.calls.lock().unwrap().location_lists += 1;
        Ok(self.locations.clone())
    }

    async fn create_payment_link(
        &self,
        quick_pay: &QuickPay,
    ) -> Result<PaymentLink, GatewayError> {
        self.calls.lock().unwrap().links.push(quick_pay.clone());
        Ok(PaymentLink {
            url: "https://square.link/u/abc123".to_string(),
            long_url: "https://checkout.example.com/abc123".to_string(),
        })
    }
}

pub fn location(id: &str, status: &str) -> Location {
    Location {
        id: id.to_string(),
        status: status.to_string(),
    }
}

pub fn payment_request(source_id: &str, amount: i64, currency: &str, email: &str) -> PaymentRequest {
    PaymentRequest {
        source_id: source_id.to_string(),
        amount,
        currency: currency.to_string(),
        email: email.to_string(),
        given_name: None,
        family_name: None,
        idempotency_key: None,
        reference_id: None,
    }
}

pub fn usd(minor_units: i64) -> Money {
    Money::new(MoneyAmount::new(minor_units).unwrap(), Currency::Usd)
}

/// App state wired to the fake, with verification enabled by default.
pub fn test_state(processor: FakeProcessor) -> AppState {
    AppState {
        processor: Arc::new(processor),
        webhooks: WebhookConfig {
            signature_key: SIGNATURE_KEY.to_string(),
            notification_url: NOTIFICATION_URL.to_string(),
            verification_disabled: false,
        },
        links: PaymentLinkConfig {
            name: "Quick Pay".to_string(),
            price: usd(1000),
        },
    }
}
