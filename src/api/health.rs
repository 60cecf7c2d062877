use axum::response::Json;
use serde_json::{Value, json};

use crate::management::TokenManager;

pub async fn health() -> Json<Value> {
    let authenticated = TokenManager::load().await.is_ok();

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": authenticated
    }))
}
