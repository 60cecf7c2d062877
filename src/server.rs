use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    api, config, discovery::DiscoveryOptions, error, info, spotify::SpotifyClient,
    types::PkceToken,
};

/// State shared by all HTTP handlers.
pub struct ServerState {
    pub pkce: Arc<Mutex<Option<PkceToken>>>,
    pub client: SpotifyClient,
    pub options: DiscoveryOptions,
}

impl ServerState {
    pub fn new(client: SpotifyClient, options: DiscoveryOptions) -> Self {
        Self {
            pkce: Arc::new(Mutex::new(None)),
            client,
            options,
        }
    }
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/generate-playlist", post(api::generate_playlist))
        .route("/logout", post(api::logout))
        .layer(Extension(state))
}

pub async fn start_api_server(state: Arc<ServerState>) {
    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot bind {}: {}", addr, e),
    };

    info!("Listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, router(state)).await {
        error!("Server stopped: {}", e);
    }
}
