//! LINE Login session service
//!
//! Implements the two-step login against the LINE gateway (authorization
//! code -> tokens, access token -> profile) and mints the HS256 session
//! token the dashboard stores in a cookie. There are no local accounts:
//! the LINE profile is the identity.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AppError, AppResult};
use crate::external::line::{LineClient, LineUserProfile};
use crate::middleware::SessionUser;

/// LINE Login authorization endpoint.
const AUTHORIZE_URL: &str = "https://access.line.me/oauth2/v2.1/authorize";

/// Session service for LINE Login
#[derive(Clone)]
pub struct AuthService {
    line: LineClient,
    redirect_uri: String,
    session_secret: String,
    session_expiry_secs: i64,
}

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    picture: Option<String>,
    iat: i64,
    exp: i64,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        line: LineClient,
        redirect_uri: String,
        session_secret: String,
        session_expiry_secs: i64,
    ) -> Self {
        Self {
            line,
            redirect_uri,
            session_secret,
            session_expiry_secs,
        }
    }

    /// Build the LINE authorization URL for the given state nonce.
    pub fn authorization_url(&self, state: &str) -> AppResult<String> {
        if !self.line.is_configured() {
            return Err(AppError::Configuration(
                "LINE login is not configured".to_string(),
            ));
        }

        let url = reqwest::Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("response_type", "code"),
                ("client_id", self.line.channel_id()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("state", state),
                ("scope", "profile openid"),
            ],
        )
        .map_err(|e| AppError::Internal(format!("failed to build authorization URL: {}", e)))?;

        Ok(url.into())
    }

    /// Fresh state nonce for the authorization round-trip, derived from the
    /// session secret and the current time.
    pub fn login_state(&self) -> String {
        let now = Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        let mut hasher = Sha256::new();
        hasher.update(self.session_secret.as_bytes());
        hasher.update(now.to_be_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }

    /// Complete the login: exchange the code, fetch the profile, and mint
    /// a session token.
    pub async fn complete_login(&self, code: &str) -> AppResult<(LineUserProfile, String)> {
        let tokens = self.line.exchange_code(code, &self.redirect_uri).await?;
        let profile = self.line.get_profile(&tokens.access_token).await?;
        let session = self.mint_session(&profile)?;
        Ok((profile, session))
    }

    /// Mint a signed session token for a LINE profile.
    pub fn mint_session(&self, profile: &LineUserProfile) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: profile.user_id.clone(),
            name: profile.display_name.clone(),
            picture: profile.picture_url.clone(),
            iat: now,
            exp: now + self.session_expiry_secs,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.session_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("failed to sign session token: {}", e)))
    }

    /// Verify a session token and return the user it names.
    pub fn verify_session(&self, token: &str) -> AppResult<SessionUser> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.session_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })?;

        Ok(SessionUser {
            line_user_id: data.claims.sub,
            display_name: data.claims.name,
            picture_url: data.claims.picture,
        })
    }
}
