//! The end-to-end flow for one payment request: validate, resolve the payer
//! to a processor-side customer, submit an idempotent charge, normalize the
//! outcome. No state survives a run; the processor's ledger is the only
//! source of truth.

use {
    crate::domain::{
        customer::NewCustomer,
        error::GatewayError,
        money::{Currency, Money, MoneyAmount},
        payment::{ChargeRequest, ChargeResult, PaymentOutcome, PaymentRequest},
        processor::ProcessorClient,
    },
    uuid::Uuid,
};

/// Structural checks in fixed order, stopping at the first violation.
/// Pure: no processor call happens until a request passes.
pub fn validate(request: &PaymentRequest) -> Result<Money, GatewayError> {
    if request.source_id.trim().is_empty() {
        return Err(GatewayError::Validation("Source ID is required".to_string()));
    }
    if request.amount <= 0 {
        return Err(GatewayError::Validation(
            "Amount must be greater than 0".to_string(),
        ));
    }
    if request.currency.trim().is_empty() {
        return Err(GatewayError::Validation("Currency is required".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(GatewayError::Validation("Email is required".to_string()));
    }
    if !looks_like_email(&request.email) {
        return Err(GatewayError::Validation("Invalid email address".to_string()));
    }

    let currency = Currency::try_from(request.currency.as_str())?;
    let amount = MoneyAmount::new(request.amount)?;
    Ok(Money::new(amount, currency))
}

fn looks_like_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Find-or-create the processor-side customer for this payer and return its
/// id.
///
/// Search and create are two remote calls with nothing transactional between
/// them: two concurrent resolutions of the same new email can each observe an
/// empty search and create duplicate records. The processor offers no
/// conditional create, so the contract is "at least one customer exists
/// afterwards", not "exactly one".
pub async fn resolve_customer(
    processor: &dyn ProcessorClient,
    email: &str,
    given_name: Option<&str>,
    family_name: Option<&str>,
) -> Result<String, GatewayError> {
    let matches = processor.search_customers_by_email(email).await?;
    if let Some(existing) = matches.first() {
        tracing::debug!(customer_id = %existing.id, "customer found by email search");
        return Ok(existing.id.clone());
    }

    let created = processor
        .create_customer(&NewCustomer {
            given_name: given_name.map(str::to_owned),
            family_name: family_name.map(str::to_owned),
            email_address: email.to_string(),
        })
        .await?;
    tracing::info!(customer_id = %created.id, "customer created");
    Ok(created.id)
}

/// Build the charge and submit it. A caller-supplied idempotency key is
/// passed through verbatim so retries of the same logical purchase stay
/// at-most-once; otherwise each call gets a fresh key.
pub async fn execute_charge(
    processor: &dyn ProcessorClient,
    request: &PaymentRequest,
    amount_money: Money,
    customer_id: String,
) -> Result<ChargeResult, GatewayError> {
    let idempotency_key = request
        .idempotency_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    processor
        .create_payment(&ChargeRequest {
            idempotency_key,
            source_id: request.source_id.clone(),
            amount_money,
            customer_id,
            reference_id: request.reference_id.clone(),
        })
        .await
}

pub async fn process_payment(
    processor: &dyn ProcessorClient,
    request: &PaymentRequest,
) -> Result<PaymentOutcome, GatewayError> {
    let amount_money = validate(request)?;

    tracing::info!(
        amount = %amount_money.amount(),
        currency = %amount_money.currency(),
        "processing payment"
    );

    // Name for a possible create: caller-supplied, else the email local part.
    let given_name = request
        .given_name
        .clone()
        .or_else(|| request.email.split('@').next().map(str::to_owned));
    let customer_id = resolve_customer(
        processor,
        &request.email,
        given_name.as_deref(),
        request.family_name.as_deref(),
    )
    .await?;

    let result = execute_charge(processor, request, amount_money, customer_id).await?;

    if result.status.is_completed() {
        tracing::info!(payment_id = %result.payment_id, "payment completed");
        Ok(PaymentOutcome::Completed {
            payment_id: result.payment_id,
            amount_money: result.amount_money,
        })
    } else {
        tracing::warn!(
            payment_id = %result.payment_id,
            status = %result.status,
            "payment not completed"
        );
        Ok(PaymentOutcome::Declined {
            message: format!("Payment was not completed. Status: {}", result.status),
        })
    }
}
