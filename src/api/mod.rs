//! # API Module
//!
//! HTTP endpoints of the local server. They are the "invoking caller" of the
//! discovery pipeline and the receiving end of the OAuth redirect.
//!
//! ## Endpoints
//!
//! - `GET /health` - liveness, version and whether a token is stored
//! - `GET /login` - redirects to Spotify's authorization page (PKCE + state)
//! - `GET /callback` - validates `state`, exchanges the code, stores the token
//! - `POST /generate-playlist` - runs the pipeline for the stored token
//! - `POST /logout` - removes the stored token
//!
//! ## `/generate-playlist` responses
//!
//! | Outcome          | Status | Body                                                                  |
//! |------------------|--------|-----------------------------------------------------------------------|
//! | playlist created | 200    | `success`, `playlist_name`, `playlist_url`, `tracks_added`, `tracks`   |
//! | nothing found    | 200    | `message`                                                             |
//! | no stored token  | 401    | `error`                                                               |
//! | credential expired | 401  | `error`                                                               |
//! | any other failure | 500   | `error`                                                               |
//!
//! `tracks` holds at most ten entries with `uri`, `name`, `artist`, `album`
//! and `release_date`.

mod callback;
mod generate;
mod health;

pub use callback::{authorization_code, callback, login};
pub use generate::{error_status, generate_playlist, logout};
pub use health::health;
