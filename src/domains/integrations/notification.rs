//! ARC Notification Service client (simulated).

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Receipt returned once a notification is accepted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReceipt {
    pub success: bool,
    pub channel: String,
    pub recipient: String,
    pub message_id: String,
    pub timestamp: String,
}

/// Client for the ARC Notification Service.
#[derive(Debug, Clone, Default)]
pub struct NotificationService;

impl NotificationService {
    pub fn new() -> Self {
        Self
    }

    /// Send a notification through the given channel.
    pub async fn send_notification(
        &self,
        channel: &str,
        recipient: &str,
        _subject: Option<&str>,
        _body: Option<&str>,
        _data: Option<&Value>,
    ) -> NotificationReceipt {
        info!("Sending {} notification to {}", channel, recipient);

        let now = Utc::now();
        let suffix = uuid::Uuid::new_v4().as_u128() % 1000;

        NotificationReceipt {
            success: true,
            channel: channel.to_string(),
            recipient: recipient.to_string(),
            message_id: format!("msg-{}-{}", now.timestamp_millis(), suffix),
            timestamp: now.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_receipt_fields() {
        let receipt = NotificationService::new()
            .send_notification("email", "a@example.com", Some("Hi"), None, None)
            .await;
        assert!(receipt.success);
        assert_eq!(receipt.channel, "email");
        assert!(receipt.message_id.starts_with("msg-"));
        assert!(chrono::DateTime::parse_from_rfc3339(&receipt.timestamp).is_ok());
    }
}
