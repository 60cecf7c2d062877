use std::sync::Arc;

use crate::server::{self, ServerState};

pub async fn serve() {
    let (client, options) = super::client_and_options();
    server::start_api_server(Arc::new(ServerState::new(client, options))).await;
}
