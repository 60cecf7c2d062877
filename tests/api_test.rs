use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode};
use weekly_discoveries::{
    api,
    discovery::DiscoveryOptions,
    error::DiscoveryError,
    server::{self, ServerState},
    spotify::SpotifyClient,
    types::PkceToken,
};

fn state() -> Arc<ServerState> {
    let client = SpotifyClient::new("http://localhost").unwrap();
    Arc::new(ServerState::new(client, DiscoveryOptions::default()))
}

fn params(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
    Query(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn test_error_status_mapping() {
    assert_eq!(
        api::error_status(&DiscoveryError::CredentialExpired),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        api::error_status(&DiscoveryError::Api {
            status: 502,
            message: "bad gateway".to_string()
        }),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        api::error_status(&DiscoveryError::Auth("nope".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_error_messages() {
    let err = DiscoveryError::Api {
        status: 503,
        message: "unavailable".to_string(),
    };
    assert_eq!(err.to_string(), "API error (503): unavailable");
    assert_eq!(
        DiscoveryError::CredentialExpired.to_string(),
        "Credential expired or revoked"
    );
}

#[tokio::test]
async fn test_health_reports_service() {
    let body = api::health().await.0;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], env!("CARGO_PKG_NAME"));
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["authenticated"].is_boolean());
}

#[tokio::test]
async fn test_callback_reports_provider_error() {
    let page = api::callback(
        params(&[("error", "access_denied")]),
        Extension(state()),
    )
    .await;

    assert!(page.0.contains("Authorization failed: access_denied"));
}

#[tokio::test]
async fn test_callback_without_login_is_rejected() {
    let page = api::callback(
        params(&[("code", "abc"), ("state", "xyz")]),
        Extension(state()),
    )
    .await;

    assert!(page.0.contains("Missing PKCE code verifier."));
}

#[tokio::test]
async fn test_callback_rejects_state_mismatch() {
    let state = state();
    *state.pkce.lock().await = Some(PkceToken {
        code_verifier: "verifier".to_string(),
        state: "expected-state".to_string(),
        token: None,
    });

    let page = api::callback(
        params(&[("code", "abc"), ("state", "forged-state")]),
        Extension(state.clone()),
    )
    .await;

    assert!(page.0.contains("Invalid state parameter"));
    assert!(state.pkce.lock().await.as_ref().unwrap().token.is_none());
}

#[tokio::test]
async fn test_callback_without_code_is_rejected() {
    let state = state();
    *state.pkce.lock().await = Some(PkceToken {
        code_verifier: "verifier".to_string(),
        state: "expected-state".to_string(),
        token: None,
    });

    let page = api::callback(params(&[("state", "expected-state")]), Extension(state)).await;

    assert!(page.0.contains("Missing authorization code."));
}

#[tokio::test]
async fn test_router_serves_health_and_callback() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server::router(state())).await.unwrap();
    });

    let http = reqwest::Client::new();

    let health = http
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let callback = http
        .get(format!("http://{}/callback?error=access_denied", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(callback.status(), reqwest::StatusCode::OK);
    assert!(callback.text().await.unwrap().contains("access_denied"));

    let wrong_method = http
        .get(format!("http://{}/generate-playlist", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_method.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_authorization_code_releases_pkce_lock() {
    let state = state();
    *state.pkce.lock().await = Some(PkceToken {
        code_verifier: "verifier".to_string(),
        state: "expected-state".to_string(),
        token: None,
    });

    let Query(query) = params(&[("code", "abc"), ("state", "expected-state")]);
    let (code, verifier) = api::authorization_code(&state.pkce, &query)
        .await
        .unwrap();

    assert_eq!(code, "abc");
    assert_eq!(verifier, "verifier");
    // the code is exchanged after this returns, with the lock free
    assert!(state.pkce.try_lock().is_ok());
}

#[tokio::test]
async fn test_authorization_code_rejects_provider_error() {
    let state = state();
    let Query(query) = params(&[("error", "access_denied")]);

    let result = api::authorization_code(&state.pkce, &query).await;

    assert_eq!(
        result,
        Err("Authorization failed: access_denied".to_string())
    );
}
