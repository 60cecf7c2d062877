use std::sync::Arc;

use crate::{error, management::TokenManager, server::ServerState, spotify, success};

pub async fn auth() {
    let (client, options) = super::client_and_options();
    spotify::auth::auth(Arc::new(ServerState::new(client, options))).await;
}

pub async fn logout() {
    match TokenManager::clear().await {
        Ok(()) => success!("Stored token removed."),
        Err(e) => error!("Cannot remove stored token: {}", e),
    }
}
