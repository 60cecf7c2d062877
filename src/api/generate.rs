use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};
use serde_json::{Value, json};

use crate::{
    discovery::{self, NOTHING_FOUND_MESSAGE},
    error::DiscoveryError,
    management::TokenManager,
    server::ServerState,
    types::RunOutcome,
    warning,
};

/// Runs the pipeline for the stored credential and reports the result as JSON.
pub async fn generate_playlist(
    Extension(state): Extension<Arc<ServerState>>,
) -> (StatusCode, Json<Value>) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Not authenticated" })),
            );
        }
    };

    let credential = token_mgr.credential().await;

    match discovery::run(&state.client, &credential, &state.options).await {
        Ok(RunOutcome::Created(summary)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "playlist_name": summary.playlist_name,
                "playlist_url": summary.playlist_url,
                "tracks_added": summary.tracks_added,
                "tracks": summary.preview,
            })),
        ),
        Ok(RunOutcome::NothingFound) => {
            (StatusCode::OK, Json(json!({ "message": NOTHING_FOUND_MESSAGE })))
        }
        Err(e) => {
            warning!("Error generating playlist: {}", e);
            (
                error_status(&e),
                Json(json!({ "error": format!("Failed to generate playlist: {}", e) })),
            )
        }
    }
}

pub fn error_status(error: &DiscoveryError) -> StatusCode {
    match error {
        DiscoveryError::CredentialExpired => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Forgets the stored token.
pub async fn logout() -> (StatusCode, Json<Value>) {
    match TokenManager::clear().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "logged out" }))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to clear token: {}", e) })),
        ),
    }
}
