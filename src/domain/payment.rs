use {
    super::money::Money,
    serde::Deserialize,
    std::fmt,
};

/// Inbound charge request, one per HTTP call. Immutable once deserialized;
/// discarded when the orchestration completes.
///
/// String fields default to empty so that missing keys surface as the
/// validator's field-level messages instead of a deserialization error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    /// Reusing the same key across retries of one logical purchase makes the
    /// retry safe at the processor; when absent a fresh key is generated.
    #[serde(default)]
    pub idempotency_key: Option<String>,
    #[serde(default)]
    pub reference_id: Option<String>,
}

/// What gets submitted to the processor. Built once per orchestration run and
/// never reused with a different amount or source.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub idempotency_key: String,
    pub source_id: String,
    pub amount_money: Money,
    pub customer_id: String,
    pub reference_id: Option<String>,
}

/// Processor-reported charge state. Only `COMPLETED` counts as success;
/// values outside the documented set are preserved literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeStatus {
    Completed,
    Approved,
    Pending,
    Canceled,
    Failed,
    Other(String),
}

impl ChargeStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "COMPLETED" => Self::Completed,
            "APPROVED" => Self::Approved,
            "PENDING" => Self::Pending,
            "CANCELED" => Self::Canceled,
            "FAILED" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Approved => "APPROVED",
            Self::Pending => "PENDING",
            Self::Canceled => "CANCELED",
            Self::Failed => "FAILED",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal result of one charge submission.
#[derive(Debug, Clone)]
pub struct ChargeResult {
    pub payment_id: String,
    pub status: ChargeStatus,
    pub amount_money: Money,
}

/// End state of one orchestration run: either the processor completed the
/// charge, or it terminated in some other state the client must hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Completed {
        payment_id: String,
        amount_money: Money,
    },
    Declined {
        message: String,
    },
}
