//! LINE platform client
//!
//! Covers the three LINE surfaces the dashboard touches:
//! - LINE Login token exchange and profile fetch (the two-step SSO flow)
//! - Messaging API push messages
//! - Webhook signature verification (HMAC-SHA256 over the raw body)

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// LINE API client
#[derive(Clone)]
pub struct LineClient {
    client: Client,
    channel_id: String,
    channel_secret: String,
    messaging_token: String,
    api_base_url: String,
}

/// Token response from the LINE OAuth endpoint
#[derive(Debug, Deserialize)]
pub struct LineTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub scope: Option<String>,
    pub id_token: Option<String>,
}

/// LINE user profile
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineUserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "pictureUrl")]
    pub picture_url: Option<String>,
    #[serde(rename = "statusMessage")]
    pub status_message: Option<String>,
}

/// Messaging API text message
#[derive(Debug, Serialize)]
pub struct LineMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: String,
}

impl LineMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            message_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Messaging API push request
#[derive(Debug, Serialize)]
struct LinePushRequest {
    to: String,
    messages: Vec<LineMessage>,
}

impl LineClient {
    /// Create a new LineClient
    pub fn new(channel_id: String, channel_secret: String, messaging_token: String) -> Self {
        Self::with_base_url(
            channel_id,
            channel_secret,
            messaging_token,
            "https://api.line.me".to_string(),
        )
    }

    /// Create a new LineClient with custom base URL (for testing)
    pub fn with_base_url(
        channel_id: String,
        channel_secret: String,
        messaging_token: String,
        api_base_url: String,
    ) -> Self {
        Self {
            client: Client::new(),
            channel_id,
            channel_secret,
            messaging_token,
            api_base_url,
        }
    }

    /// Whether LINE credentials were configured at all.
    pub fn is_configured(&self) -> bool {
        !self.channel_id.is_empty() && !self.channel_secret.is_empty()
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Exchange an authorization code for tokens (step one of the login).
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> AppResult<LineTokenResponse> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", &self.channel_id),
            ("client_secret", &self.channel_secret),
        ];

        let response = self
            .client
            .post(format!("{}/oauth2/v2.1/token", self.api_base_url))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::LineApiError(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::LineApiError(format!(
                "token exchange failed: {}",
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LineApiError(format!("malformed token response: {}", e)))
    }

    /// Fetch the user profile for an access token (step two of the login).
    pub async fn get_profile(&self, access_token: &str) -> AppResult<LineUserProfile> {
        let response = self
            .client
            .get(format!("{}/v2/profile", self.api_base_url))
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| AppError::LineApiError(format!("profile request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::LineApiError(format!(
                "profile fetch failed: {}",
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LineApiError(format!("malformed profile response: {}", e)))
    }

    /// Push a message to a LINE user.
    pub async fn push_message(&self, line_user_id: &str, message: LineMessage) -> AppResult<()> {
        let request = LinePushRequest {
            to: line_user_id.to_string(),
            messages: vec![message],
        };

        let response = self
            .client
            .post(format!("{}/v2/bot/message/push", self.api_base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.messaging_token),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LineApiError(format!("push request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::LineApiError(format!(
                "push message failed: {}",
                error_text
            )));
        }

        Ok(())
    }

    /// Compute the webhook signature for a raw body.
    pub fn signature(&self, body: &[u8]) -> AppResult<String> {
        let mut mac = HmacSha256::new_from_slice(self.channel_secret.as_bytes())
            .map_err(|_| AppError::Internal("failed to create HMAC".to_string()))?;
        mac.update(body);
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    /// Verify the `x-line-signature` header against a raw webhook body.
    pub fn verify_signature(&self, body: &[u8], signature: &str) -> bool {
        match self.signature(body) {
            Ok(expected) => expected == signature,
            Err(_) => false,
        }
    }
}
