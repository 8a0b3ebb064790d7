//! Notification tool definition.
//!
//! Sends a notification through the ARC Notification Service.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::domains::integrations::NotificationService;
use crate::domains::tools::{HandlerResult, ToolDescriptor, parse_params, to_output};

/// Delivery channel of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationChannel {
    Email,
    Sms,
    Push,
    InApp,
}

impl NotificationChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
            Self::InApp => "in-app",
        }
    }
}

/// Parameters for the notification tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NotificationParams {
    /// The notification channel to use.
    pub channel: NotificationChannel,
    pub recipient: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

/// Notification tool - sends notifications across channels.
pub struct NotificationTool;

impl NotificationTool {
    pub const ID: &'static str = "arc.api.notification";

    pub const NAME: &'static str = "Notification Service";

    pub const DESCRIPTION: &'static str =
        "Send notifications across multiple channels in ARC applications";

    #[instrument(skip_all, fields(channel = params.channel.as_str()))]
    pub async fn execute(service: &NotificationService, params: NotificationParams) -> HandlerResult {
        let data = params.data.map(Value::Object);
        let receipt = service
            .send_notification(
                params.channel.as_str(),
                &params.recipient,
                params.subject.as_deref(),
                params.body.as_deref(),
                data.as_ref(),
            )
            .await;
        to_output(&receipt)
    }

    pub fn descriptor(service: Arc<NotificationService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<NotificationParams>()
            .handler_fn(move |input| {
                let service = service.clone();
                async move { Self::execute(&service, parse_params(input)?).await }
            })
    }
}
