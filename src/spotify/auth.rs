use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::{
    sync::{Mutex, oneshot},
    time::timeout,
};

use crate::{
    Res,
    config::{self, Credentials},
    error::Error,
    server,
    types::{AuthCallback, Token},
    utils, warning,
};

/// How long the flow waits for the browser callback before giving up.
const CODE_WAIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Runs the complete one-shot OAuth authorization-code flow.
///
/// Starts the local callback listener, opens the authorization URL in the
/// user's browser and waits for the redirect to deliver the authorization
/// code, which is then exchanged for a token.
///
/// # Flow
///
/// 1. A random `state` value is generated and a one-shot channel is placed
///    in the shared callback state.
/// 2. The callback handler verifies `state`, takes the sender out of the
///    shared state and resolves it exactly once with the received code.
/// 3. This function awaits the receiver under a timeout; an expired wait is
///    the cancellation path when no code ever arrives.
/// 4. The code is exchanged at the token endpoint using HTTP Basic
///    authentication with the client id and secret.
///
/// The listener stays bound for the remainder of the process; the port is
/// released when the process exits after the run completes.
///
/// # Errors
///
/// Returns [`Error::Auth`] when the browser callback times out or the token
/// exchange fails.
pub async fn authorize(credentials: &Credentials) -> Res<Token> {
    let state = utils::generate_state();
    let (code_tx, code_rx) = oneshot::channel();

    let shared = Arc::new(AuthCallback {
        expected_state: state.clone(),
        code_tx: Mutex::new(Some(code_tx)),
    });

    let server_state = Arc::clone(&shared);
    tokio::spawn(async move {
        server::start_callback_server(server_state).await;
    });

    let redirect_uri = config::local_redirect_uri();
    let auth_url = authorize_url(credentials, &redirect_uri, &state);

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
    }

    let code = timeout(CODE_WAIT_TIMEOUT, code_rx)
        .await
        .map_err(|_| Error::Auth("timed out waiting for the authorization code".to_string()))?
        .map_err(|_| Error::Auth("callback listener stopped before a code arrived".to_string()))?;

    exchange_code(credentials, &code, &redirect_uri).await
}

/// Builds the authorization URL the user grants access on.
pub fn authorize_url(credentials: &Credentials, redirect_uri: &str, state: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
        auth_url = config::SPOTIFY_AUTH_URL,
        client_id = credentials.client_id,
        redirect_uri = redirect_uri,
        scope = config::OAUTH_SCOPES.join("%20"),
        state = state
    )
}

/// Exchanges an authorization code for an access token.
///
/// Uses the authorization-code grant with HTTP Basic authentication, i.e.
/// `base64(client_id:client_secret)` in the `Authorization` header. The
/// redirect URI must match the one used in the authorization request.
pub async fn exchange_code(
    credentials: &Credentials,
    code: &str,
    redirect_uri: &str,
) -> Res<Token> {
    let client = Client::new();
    let res = client
        .post(config::SPOTIFY_TOKEN_URL)
        .header("Authorization", basic_auth(credentials))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await
        .map_err(|e| Error::Auth(e.to_string()))?
        .error_for_status()
        .map_err(|e| Error::Auth(e.to_string()))?;

    let json: Value = res.json().await.map_err(|e| Error::Auth(e.to_string()))?;
    token_from_json(&json).ok_or_else(|| Error::Auth("malformed token response".to_string()))
}

/// Exchanges a refresh token for a fresh access token.
///
/// The response may omit the refresh token; callers keep their previous one
/// in that case.
pub async fn refresh_token(credentials: &Credentials, refresh_token: &str) -> Res<Token> {
    let client = Client::new();
    let res = client
        .post(config::SPOTIFY_TOKEN_URL)
        .header("Authorization", basic_auth(credentials))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| Error::Auth(e.to_string()))?
        .error_for_status()
        .map_err(|e| Error::Auth(e.to_string()))?;

    let json: Value = res.json().await.map_err(|e| Error::Auth(e.to_string()))?;
    let mut token = token_from_json(&json)
        .ok_or_else(|| Error::Auth("malformed token response".to_string()))?;
    if token.refresh_token.is_empty() {
        token.refresh_token = refresh_token.to_string();
    }
    Ok(token)
}

fn basic_auth(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(pair))
}

fn token_from_json(json: &Value) -> Option<Token> {
    Some(Token {
        access_token: json["access_token"].as_str()?.to_string(),
        refresh_token: json["refresh_token"].as_str().unwrap_or_default().to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
