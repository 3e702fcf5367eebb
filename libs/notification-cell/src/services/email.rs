use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{DeliveryOutcome, EmailRecord};

/// Delivery channel consumed by the scheduler. Implementations report the
/// outcome instead of failing: a failed delivery is data, not an error.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> DeliveryOutcome;
}

/// Simulated email sender. No external calls are made; delivery succeeds
/// for any plausible address and every attempt lands in the history.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    sender: String,
    history: Arc<RwLock<Vec<EmailRecord>>>,
}

impl EmailNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sender(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Snapshot of all delivery attempts, oldest first.
    pub async fn history(&self) -> Vec<EmailRecord> {
        self.history.read().await.clone()
    }
}

impl Default for EmailNotifier {
    fn default() -> Self {
        Self::with_sender("no-reply@sanare.clinic")
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> DeliveryOutcome {
        let (delivered, error_detail) = if recipient.trim().is_empty() || !recipient.contains('@')
        {
            warn!("Email delivery failed, invalid recipient address");
            (false, Some("Invalid recipient address".to_string()))
        } else {
            info!(
                "Sending email from {} to {} subject: {}",
                self.sender, recipient, subject
            );
            (true, None)
        };

        let record = EmailRecord {
            id: Uuid::new_v4(),
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            delivered,
            error_detail: error_detail.clone(),
            sent_at: Utc::now(),
        };

        self.history.write().await.push(record);

        DeliveryOutcome {
            delivered,
            error_detail,
        }
    }
}
