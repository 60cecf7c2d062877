use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    response::{Html, Redirect},
};
use tokio::sync::Mutex;

use crate::{
    management::TokenManager, server::ServerState, spotify, types::PkceToken, warning,
};

/// Redirects the browser to Spotify's authorization page.
pub async fn login(Extension(state): Extension<Arc<ServerState>>) -> Result<Redirect, Html<String>> {
    match spotify::auth::begin_authorization(&state.pkce).await {
        Ok(url) => Ok(Redirect::to(&url)),
        Err(e) => Err(Html(format!("<h4>Cannot start authorization: {}</h4>", e))),
    }
}

/// Completes the authorization code flow.
///
/// Rejects a callback whose `state` does not match the one issued by the
/// login step before any token exchange happens. The PKCE lock is not held
/// during the exchange.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<ServerState>>,
) -> Html<String> {
    let (code, verifier) = match authorization_code(&state.pkce, &params).await {
        Ok(pair) => pair,
        Err(message) => return Html(format!("<h4>{}</h4>", message)),
    };

    match spotify::auth::exchange_code_pkce(&code, &verifier).await {
        Ok(token) => {
            if let Err(e) = TokenManager::new(token.clone()).persist().await {
                warning!("Failed to save token to cache: {}", e);
                return Html("<h4>Login succeeded but the token could not be saved.</h4>".to_string());
            }
            if let Some(pkce) = state.pkce.lock().await.as_mut() {
                pkce.token = Some(token);
            }
            Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>".to_string())
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>".to_string())
        }
    }
}

/// Checks the callback parameters against the pending login and returns the
/// authorization code with its PKCE verifier.
pub async fn authorization_code(
    pkce: &Mutex<Option<PkceToken>>,
    params: &HashMap<String, String>,
) -> Result<(String, String), String> {
    if let Some(error) = params.get("error") {
        return Err(format!("Authorization failed: {}", error));
    }

    let pkce = pkce.lock().await;
    let Some(pending) = pkce.as_ref() else {
        return Err("Missing PKCE code verifier.".to_string());
    };

    if params.get("state") != Some(&pending.state) {
        return Err("Invalid state parameter".to_string());
    }

    let Some(code) = params.get("code") else {
        return Err("Missing authorization code.".to_string());
    };

    Ok((code.clone(), pending.code_verifier.clone()))
}
