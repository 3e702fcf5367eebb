use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a single delivery attempt, as reported back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub delivered: bool,
    pub error_detail: Option<String>,
}

/// One entry in the delivery history. Every attempt is recorded, whether
/// it was delivered or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub delivered: bool,
    pub error_detail: Option<String>,
    pub sent_at: DateTime<Utc>,
}
