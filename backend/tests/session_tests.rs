//! Session token and LINE signature tests

use weather_dashboard_backend::error::AppError;
use weather_dashboard_backend::external::line::{LineClient, LineUserProfile};
use weather_dashboard_backend::services::AuthService;

fn line_client() -> LineClient {
    LineClient::new(
        "channel-id".to_string(),
        "channel-secret".to_string(),
        "messaging-token".to_string(),
    )
}

fn auth_service(expiry_secs: i64) -> AuthService {
    AuthService::new(
        line_client(),
        "http://localhost:3000/auth/line/callback".to_string(),
        "test-session-secret".to_string(),
        expiry_secs,
    )
}

fn profile() -> LineUserProfile {
    LineUserProfile {
        user_id: "U1234567890".to_string(),
        display_name: "สมชาย".to_string(),
        picture_url: Some("https://profile.line-scdn.net/abc".to_string()),
        status_message: None,
    }
}

// ============================================================================
// Session tokens
// ============================================================================

#[test]
fn session_token_round_trips() {
    let auth = auth_service(3600);
    let token = auth.mint_session(&profile()).unwrap();

    let user = auth.verify_session(&token).unwrap();
    assert_eq!(user.line_user_id, "U1234567890");
    assert_eq!(user.display_name, "สมชาย");
    assert_eq!(
        user.picture_url.as_deref(),
        Some("https://profile.line-scdn.net/abc")
    );
}

#[test]
fn expired_session_is_rejected_as_expired() {
    // Mint a token that expired well past the validation leeway.
    let auth = auth_service(-3600);
    let token = auth.mint_session(&profile()).unwrap();

    match auth.verify_session(&token) {
        Err(AppError::TokenExpired) => {}
        unexpected => panic!(
            "expected TokenExpired, got {:?}",
            unexpected.map(|u| u.line_user_id)
        ),
    }
}

#[test]
fn token_signed_with_another_secret_is_rejected() {
    let auth = auth_service(3600);
    let other = AuthService::new(
        line_client(),
        "http://localhost:3000/auth/line/callback".to_string(),
        "a-different-secret".to_string(),
        3600,
    );

    let token = other.mint_session(&profile()).unwrap();
    match auth.verify_session(&token) {
        Err(AppError::InvalidToken) => {}
        unexpected => panic!(
            "expected InvalidToken, got {:?}",
            unexpected.map(|u| u.line_user_id)
        ),
    }
}

#[test]
fn garbage_token_is_rejected() {
    let auth = auth_service(3600);
    assert!(matches!(
        auth.verify_session("not-a-token"),
        Err(AppError::InvalidToken)
    ));
}

// ============================================================================
// Authorization URL
// ============================================================================

#[test]
fn authorization_url_carries_the_login_parameters() {
    let auth = auth_service(3600);
    let url = auth.authorization_url("state-nonce").unwrap();

    assert!(url.starts_with("https://access.line.me/oauth2/v2.1/authorize?"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("client_id=channel-id"));
    assert!(url.contains("state=state-nonce"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fline%2Fcallback"));
}

#[test]
fn unconfigured_line_login_is_a_configuration_error() {
    let unconfigured = AuthService::new(
        LineClient::new(String::new(), String::new(), String::new()),
        "http://localhost:3000/auth/line/callback".to_string(),
        "secret".to_string(),
        3600,
    );

    assert!(matches!(
        unconfigured.authorization_url("state"),
        Err(AppError::Configuration(_))
    ));
}

#[test]
fn login_state_is_cookie_safe() {
    let auth = auth_service(3600);
    let nonce = auth.login_state();
    assert!(!nonce.is_empty());
    assert!(nonce
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

// ============================================================================
// Webhook signatures
// ============================================================================

#[test]
fn webhook_signature_verifies_the_exact_body_only() {
    let client = line_client();
    let body = br#"{"destination":"U0","events":[]}"#;

    let signature = client.signature(body).unwrap();
    assert!(client.verify_signature(body, &signature));

    let tampered = br#"{"destination":"U1","events":[]}"#;
    assert!(!client.verify_signature(tampered, &signature));
    assert!(!client.verify_signature(body, "bm90LXRoZS1zaWduYXR1cmU="));
}

#[test]
fn signature_depends_on_the_channel_secret() {
    let body = b"payload";
    let first = line_client().signature(body).unwrap();
    let second = LineClient::new(
        "channel-id".to_string(),
        "another-secret".to_string(),
        "messaging-token".to_string(),
    )
    .signature(body)
    .unwrap();
    assert_ne!(first, second);
}
