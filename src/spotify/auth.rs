use std::{sync::Arc, time::Duration};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{DiscoveryError, Result},
    error, server,
    server::ServerState,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long the CLI waits for the browser round trip.
const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    expires_in: Option<u64>,
}

/// Runs the authorization code flow with PKCE from the command line.
///
/// Starts the local callback server, opens the authorization page in the
/// browser and waits until the callback handler has exchanged and persisted
/// the token.
pub async fn auth(state: Arc<ServerState>) {
    let auth_url = match begin_authorization(&state.pkce).await {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL: {}", e),
    };

    let server_state = Arc::clone(&state);
    tokio::spawn(async move {
        server::start_api_server(server_state).await;
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(Arc::clone(&state.pkce)).await {
        Some(_) => success!("Authentication successful!"),
        None => error!("Authentication failed or timed out."),
    }
}

/// Generates a fresh verifier and state, stores them for the callback and
/// returns the URL the user has to visit.
pub async fn begin_authorization(pkce: &Arc<Mutex<Option<PkceToken>>>) -> Result<String> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    let auth_url = authorize_url(&code_challenge, &state)?;

    let mut lock = pkce.lock().await;
    *lock = Some(PkceToken {
        code_verifier,
        state,
        token: None,
    });

    Ok(auth_url)
}

pub fn authorize_url(code_challenge: &str, state: &str) -> Result<String> {
    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id()),
            ("response_type", "code".to_string()),
            ("redirect_uri", config::spotify_redirect_uri()),
            ("code_challenge", code_challenge.to_string()),
            ("code_challenge_method", "S256".to_string()),
            ("scope", config::spotify_scope()),
            ("state", state.to_string()),
        ],
    )
    .map_err(|e| DiscoveryError::Auth(e.to_string()))?;

    Ok(url.to_string())
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for Spotify authorization...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
            pb.finish_and_clear();
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}

/// Exchanges an authorization code plus PKCE verifier for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let form = with_client_secret(vec![
        ("grant_type", "authorization_code".to_string()),
        ("client_id", config::spotify_client_id()),
        ("code", code.to_string()),
        ("code_verifier", verifier.to_string()),
        ("redirect_uri", config::spotify_redirect_uri()),
    ]);

    let response = request_token(&form).await?;
    let refresh_token = response.refresh_token.clone().unwrap_or_default();
    into_token(response, refresh_token)
}

/// Trades a refresh token for a new access token.
///
/// Spotify may omit the refresh token in the response; the old one stays valid
/// in that case and is carried over.
pub async fn refresh_token(refresh_token: &str) -> Result<Token> {
    let form = with_client_secret(vec![
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token.to_string()),
        ("client_id", config::spotify_client_id()),
    ]);

    let response = request_token(&form).await?;
    let next_refresh = response
        .refresh_token
        .clone()
        .unwrap_or_else(|| refresh_token.to_string());
    into_token(response, next_refresh)
}

fn with_client_secret(mut form: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
    if let Some(secret) = config::spotify_client_secret() {
        form.push(("client_secret", secret));
    }
    form
}

async fn request_token(form: &[(&'static str, String)]) -> Result<TokenResponse> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(form)
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(DiscoveryError::Auth(format!(
            "token endpoint returned {}: {}",
            status, body
        )));
    }

    Ok(serde_json::from_str(&body)?)
}

fn into_token(response: TokenResponse, refresh_token: String) -> Result<Token> {
    let access_token = response
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DiscoveryError::Auth("token response without access_token".to_string()))?;

    Ok(Token {
        access_token,
        refresh_token,
        scope: response.scope,
        expires_in: response.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
