//! Push notifications and webhook intake for the LINE gateway

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::line::{LineClient, LineMessage};

/// Notification service
#[derive(Clone)]
pub struct NotifyService {
    line: LineClient,
}

/// LINE webhook request body
/// See: https://developers.line.biz/en/reference/messaging-api/#webhook-event-objects
#[derive(Debug, Deserialize)]
pub struct LineWebhookRequest {
    /// User ID of the LINE Official Account that received the event
    pub destination: String,
    /// Array of webhook event objects
    pub events: Vec<LineWebhookEvent>,
}

/// LINE webhook event
#[derive(Debug, Deserialize)]
pub struct LineWebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "replyToken")]
    pub reply_token: Option<String>,
    pub source: Option<LineEventSource>,
    pub message: Option<LineEventMessage>,
    pub timestamp: i64,
}

/// LINE event source
#[derive(Debug, Deserialize)]
pub struct LineEventSource {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// LINE event message
#[derive(Debug, Deserialize)]
pub struct LineEventMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub id: String,
    pub text: Option<String>,
}

impl NotifyService {
    /// Create a new NotifyService
    pub fn new(line: LineClient) -> Self {
        Self { line }
    }

    /// Push a text message to a LINE user.
    pub async fn push_text(&self, line_user_id: &str, text: &str) -> AppResult<()> {
        if !self.line.is_configured() {
            return Err(AppError::Configuration(
                "LINE messaging is not configured".to_string(),
            ));
        }
        self.line
            .push_message(line_user_id, LineMessage::text(text))
            .await
    }

    /// Record the events of a verified webhook delivery.
    ///
    /// The dashboard has no chatbot; events are logged for observability
    /// and otherwise acknowledged.
    pub fn process_webhook(&self, request: &LineWebhookRequest) {
        for event in &request.events {
            let user = event
                .source
                .as_ref()
                .and_then(|s| s.user_id.as_deref())
                .unwrap_or("unknown");
            match &event.message {
                Some(message) => tracing::info!(
                    "LINE webhook {} event from {}: {} message",
                    event.event_type,
                    user,
                    message.message_type
                ),
                None => tracing::info!(
                    "LINE webhook {} event from {}",
                    event.event_type,
                    user
                ),
            }
        }
    }
}
