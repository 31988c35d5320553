//! Maps opaque processor failures to the closed set of messages a client may
//! see. Everything else about the failure stays in the logs.

/// Priority-ordered: the first needle found in the lower-cased error text
/// decides the message.
const USER_MESSAGES: &[(&str, &str)] = &[
    (
        "card_declined",
        "Your card was declined. Please try a different card.",
    ),
    ("insufficient_funds", "Insufficient funds on your card."),
    (
        "expired_card",
        "Your card has expired. Please use a different card.",
    ),
    ("invalid_expiration", "Invalid card expiration date."),
    (
        "invalid_card",
        "Invalid card information. Please check your card details.",
    ),
    (
        "verify_needed",
        "Card verification required. Please contact your bank.",
    ),
    (
        "authentication_required",
        "Card authentication required. Please try again.",
    ),
];

pub const FALLBACK_MESSAGE: &str = "Payment processing failed. Please try again.";

pub fn user_facing_message(raw: &str) -> &'static str {
    let lowered = raw.to_lowercase();
    USER_MESSAGES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, message)| *message)
        .unwrap_or(FALLBACK_MESSAGE)
}
