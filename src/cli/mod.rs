//! # CLI Module
//!
//! Command implementations behind the `weekly-discoveries` binary. Each command
//! loads what it needs (token, client, options), delegates to the discovery
//! pipeline or the HTTP server, and reports through the output macros.
//!
//! ## Commands
//!
//! - [`auth`] - authorization code flow with PKCE through the local callback server
//! - [`generate`] - runs the pipeline and creates this week's playlist
//!   (`--dry-run` only lists what would be added)
//! - [`serve`] - runs the HTTP server for browser-driven use
//! - [`logout`] - removes the stored token
//!
//! ## Usage
//!
//! ```bash
//! weekly-discoveries auth              # authorize once
//! weekly-discoveries generate          # create "Weekly Discoveries - <date>"
//! weekly-discoveries generate --dry-run
//! weekly-discoveries serve             # POST /generate-playlist from a browser
//! ```

mod auth;
mod generate;
mod serve;

pub use auth::{auth, logout};
pub use generate::generate;
pub use serve::serve;

use crate::{config, discovery::DiscoveryOptions, error, spotify::SpotifyClient};

fn client_and_options() -> (SpotifyClient, DiscoveryOptions) {
    let client = match SpotifyClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client: {}", e),
    };

    (client, config::discovery_options())
}
