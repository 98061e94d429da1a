//! HTTP handlers for LINE Login and session management

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::{CurrentUser, SessionUser};
use crate::AppState;

/// Cookie carrying the OAuth state nonce across the authorization redirect.
const STATE_COOKIE: &str = "twd_oauth_state";

/// Response carrying the LINE authorization URL
#[derive(Debug, Serialize)]
pub struct AuthorizationUrlResponse {
    pub url: String,
}

/// Begin the login: hand the client the LINE authorization URL and pin the
/// state nonce in a cookie for the callback to check.
pub async fn get_authorization_url(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<AuthorizationUrlResponse>)> {
    let nonce = state.auth.login_state();
    let url = state.auth.authorization_url(&nonce)?;

    let cookie = Cookie::build((STATE_COOKIE, nonce))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(AuthorizationUrlResponse { url })))
}

/// Query parameters LINE sends to the callback
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

/// Complete the login: verify the state nonce, run the token-then-profile
/// exchange, and set the session cookie.
pub async fn handle_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> AppResult<(CookieJar, Redirect)> {
    let expected = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    if expected.as_deref() != Some(query.state.as_str()) {
        return Err(AppError::Unauthorized {
            message: "OAuth state mismatch".to_string(),
            message_th: "ค่า state ไม่ตรงกัน".to_string(),
        });
    }

    let (profile, session) = state.auth.complete_login(&query.code).await?;
    tracing::info!("LINE login completed for {}", profile.display_name);

    let session_cookie = Cookie::build((state.config.session.cookie_name.clone(), session))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let jar = jar.remove(removal_cookie(STATE_COOKIE)).add(session_cookie);
    Ok((jar, Redirect::to("/")))
}

/// Current session user
pub async fn get_me(current_user: CurrentUser) -> Json<SessionUser> {
    Json(current_user.0)
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Clear the session cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.remove(removal_cookie(state.config.session.cookie_name.clone()));
    (jar, Json(LogoutResponse { success: true }))
}

/// Removal cookies must carry the same path the originals were set with.
fn removal_cookie(name: impl Into<String>) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.into(), "");
    cookie.set_path("/");
    cookie
}
