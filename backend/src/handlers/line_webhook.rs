//! HTTP handler for the LINE webhook
//!
//! The gateway signs every delivery with HMAC-SHA256 over the raw body;
//! verification has to happen before the body is parsed.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;

use crate::services::notify::LineWebhookRequest;
use crate::AppState;

/// Webhook acknowledgement body
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
}

/// Receive a LINE webhook delivery.
pub async fn handle_line_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, (StatusCode, Json<WebhookResponse>)> {
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| rejection(StatusCode::UNAUTHORIZED, "Missing x-line-signature header"))?;

    if !state.line.verify_signature(&body, signature) {
        return Err(rejection(StatusCode::UNAUTHORIZED, "Signature mismatch"));
    }

    let request: LineWebhookRequest = serde_json::from_slice(&body).map_err(|e| {
        rejection(
            StatusCode::BAD_REQUEST,
            &format!("Invalid request body: {}", e),
        )
    })?;

    state.notify.process_webhook(&request);

    Ok(Json(WebhookResponse {
        success: true,
        message: "Webhook processed successfully".to_string(),
    }))
}

fn rejection(status: StatusCode, message: &str) -> (StatusCode, Json<WebhookResponse>) {
    (
        status,
        Json(WebhookResponse {
            success: false,
            message: message.to_string(),
        }),
    )
}
