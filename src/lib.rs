//! Weekly Discoveries Library
//!
//! Finds last week's releases from the artists a Spotify listener follows and
//! from the artists Spotify relates to them, then writes those tracks into a
//! new private playlist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `discovery` - The discovery pipeline: collect, expand, filter, flatten, materialize
//! - `error` - Error type of remote calls and pipeline stages
//! - `management` - Token storage and refresh
//! - `server` - Local HTTP server
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use weekly_discoveries::{config, discovery, management::TokenManager, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> weekly_discoveries::Res<()> {
//!     config::load_env().await?;
//!     let credential = TokenManager::load().await?.credential().await;
//!     let client = SpotifyClient::from_env()?;
//!     let outcome = discovery::run(&client, &credential, &config::discovery_options()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias for the CLI and configuration layers.
///
/// Remote calls and pipeline stages use [`error::Result`] instead; this alias
/// is for call sites that mix those with file and config errors.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Found {} followed artists.", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red error line to stderr and exits with status 1.
///
/// Only for command and server bootstrap code. Library code returns
/// [`error::DiscoveryError`] instead.
///
/// ```
/// error!("Failed to load token. Please run weekly-discoveries auth");
/// // unreachable
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow warning line to stderr. Execution continues.
///
/// ```
/// warning!("Credential rejected while listing releases of {}; skipping.", artist_id);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
