//! HTTP handler for pushing LINE notifications

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::AppState;

/// Input for sending a notification
#[derive(Debug, Deserialize)]
pub struct SendNotificationInput {
    pub message: String,
}

/// Notification send response
#[derive(Debug, Serialize)]
pub struct SendNotificationResponse {
    pub success: bool,
}

/// Push a text message to the logged-in user's LINE account.
pub async fn send_notification(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<SendNotificationInput>,
) -> AppResult<Json<SendNotificationResponse>> {
    state
        .notify
        .push_text(&current_user.0.line_user_id, &input.message)
        .await?;
    Ok(Json(SendNotificationResponse { success: true }))
}
