use {
    crate::{
        AppState,
        adapters::{
            api_errors::ApiError,
            webhook::{self, Dispatched},
        },
        domain::{error::GatewayError, payment::{PaymentOutcome, PaymentRequest}},
        services::{payment_links, payments},
    },
    axum::{
        Json,
        extract::State,
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
    },
};

pub async fn process_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Response, ApiError> {
    let outcome = payments::process_payment(state.processor.as_ref(), &request).await?;

    Ok(match outcome {
        PaymentOutcome::Completed {
            payment_id,
            amount_money,
        } => (
            StatusCode::OK,
            Json(serde_json::json!({
                "Status": "Success",
                "PaymentId": payment_id,
                "Amount": amount_money.amount().minor_units(),
                "Currency": amount_money.currency().as_str(),
            })),
        )
            .into_response(),
        PaymentOutcome::Declined { message } => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "Status": "Failed",
                "Message": message,
            })),
        )
            .into_response(),
    })
}

pub async fn create_payment_link(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let link = payment_links::create_payment_link(
        state.processor.as_ref(),
        &state.links.name,
        state.links.price,
    )
    .await?;

    Ok(Json(serde_json::json!({
        "Status": "Success",
        "Url": link.url,
        "LongUrl": link.long_url,
    })))
}

/// Always acknowledges with 200 once the event is verified and parseable,
/// even for event types this service does not react to; anything else makes
/// the processor retry delivery.
pub async fn square_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<StatusCode, ApiError> {
    if state.webhooks.verification_disabled {
        tracing::warn!("signature verification disabled by configuration; accepting event unverified");
    } else {
        let signature = headers
            .get("X-Square-Signature")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !webhook::verify_signature(
            &state.webhooks.signature_key,
            &state.webhooks.notification_url,
            &body,
            signature,
        ) {
            return Err(GatewayError::Signature(
                "X-Square-Signature did not match the request body".to_string(),
            )
            .into());
        }
    }

    let event = webhook::parse_event(&body)?;
    match webhook::dispatch(&event) {
        Dispatched::PaymentUpdated { payment_status } => match payment_status.as_deref() {
            Some("COMPLETED") => {
                tracing::info!("webhook: payment completed");
            }
            Some(other) => {
                tracing::info!(status = %other, "webhook: payment updated");
            }
            None => {
                tracing::warn!("webhook: payment.updated without a status field");
            }
        },
        Dispatched::Ignored { event_type } => {
            tracing::info!(event_type = %event_type, "webhook: unhandled event type");
        }
    }

    Ok(StatusCode::OK)
}
