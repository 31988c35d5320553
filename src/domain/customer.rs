use serde::{Deserialize, Serialize};

/// Customer record owned by the remote processor. Never persisted locally;
/// resolved fresh (search, optionally create) on every payment attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

/// Creation body used when the email search comes up empty.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    pub email_address: String,
}
