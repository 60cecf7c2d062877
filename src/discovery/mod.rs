//! # Discovery Pipeline
//!
//! Turns a listener's followed artists into a playlist of last week's
//! releases. Stages run strictly one after another:
//!
//! ```text
//! collect_followed_artists   paginated walk of /me/following
//!          ↓
//! expand                     followed + up to N related artists per seed
//!          ↓
//! filter_recent              albums/singles released inside the window
//!          ↓
//! flatten                    album tracks with artist/album/date folded in
//!          ↓
//! materialize                private playlist, tracks added 100 at a time
//! ```
//!
//! [`run`] sequences the stages and returns a [`RunOutcome`](crate::types::RunOutcome).
//! [`discover`] stops before the playlist is written.
//!
//! ## Expired credentials
//!
//! A rejected credential ends the followed-artist walk early and turns any
//! per-artist lookup into "no data". Only the profile lookup and the playlist
//! writes treat it as fatal.
//!
//! ## Fan-out
//!
//! Related-artist and release lookups are independent per artist and run in
//! chunks of `concurrency` spawned tasks. Results are gathered in input
//! order, so output order never depends on completion order.

mod collector;
mod expander;
mod filter;
mod flatten;
mod materializer;
mod pipeline;

use std::future::Future;

pub use collector::{FOLLOWED_PAGE_SIZE, collect_followed_artists};
pub use expander::{ArtistSet, expand};
pub use filter::{ReleaseWithTracks, filter_recent};
pub use flatten::flatten;
pub use materializer::materialize;
pub use pipeline::{NOTHING_FOUND_MESSAGE, PREVIEW_LIMIT, discover, run, run_at};

use crate::error::Result;

/// Tuning knobs of a discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Related artists taken per followed artist.
    pub per_seed_cap: usize,
    /// Artists whose releases are checked.
    pub total_cap: usize,
    /// Length of the lookback window in days.
    pub lookback_days: i64,
    /// Market releases must be available in.
    pub market: String,
    /// Releases listed per artist.
    pub album_limit: u32,
    /// Remote calls in flight during fan-out.
    pub concurrency: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            per_seed_cap: 5,
            total_cap: 50,
            lookback_days: 7,
            market: "US".to_string(),
            album_limit: 10,
            concurrency: 4,
        }
    }
}

/// Runs `task` for every key with at most `concurrency` tasks in flight and
/// returns the results in key order.
///
/// The first failed task fails the whole fan-out once its chunk is joined.
pub(crate) async fn fan_out<T, F, Fut>(keys: &[String], concurrency: usize, task: F) -> Result<Vec<T>>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let mut results = Vec::with_capacity(keys.len());

    for chunk in keys.chunks(concurrency.max(1)) {
        let handles: Vec<_> = chunk
            .iter()
            .cloned()
            .map(|key| tokio::spawn(task(key)))
            .collect();

        let mut failure = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(value)) => results.push(value),
                Ok(Err(e)) => {
                    failure.get_or_insert(e);
                }
                Err(e) => {
                    failure.get_or_insert(e.into());
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }
    }

    Ok(results)
}
