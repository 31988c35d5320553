use crate::domain::{
    error::GatewayError,
    money::Money,
    processor::{PaymentLink, ProcessorClient, QuickPay},
};

/// Create a hosted quick-pay checkout for a fixed price. Stateless
/// request/response; the link must be anchored to an ACTIVE location.
pub async fn create_payment_link(
    processor: &dyn ProcessorClient,
    name: &str,
    price: Money,
) -> Result<PaymentLink, GatewayError> {
    let locations = processor.list_locations().await?;
    let location = locations
        .iter()
        .find(|location| location.is_active())
        .ok_or_else(|| GatewayError::Validation("No active location found".to_string()))?;

    let link = processor
        .create_payment_link(&QuickPay {
            name: name.to_string(),
            price_money: price,
            location_id: location.id.clone(),
        })
        .await?;

    tracing::info!(url = %link.url, "payment link created");
    Ok(link)
}
