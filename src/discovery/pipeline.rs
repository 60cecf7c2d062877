use chrono::{DateTime, Utc};

use crate::{
    discovery::{
        DiscoveryOptions, collect_followed_artists, expand, filter_recent, flatten, materialize,
    },
    error::{DiscoveryError, Result},
    info,
    spotify::{self, SpotifyClient},
    types::{Credential, RunOutcome, RunSummary, Track},
    utils, warning,
};

/// Tracks included in a run summary.
pub const PREVIEW_LIMIT: usize = 10;

pub const NOTHING_FOUND_MESSAGE: &str = "No recent releases found from the last week";

/// Runs the whole pipeline against the current time.
pub async fn run(
    client: &SpotifyClient,
    credential: &Credential,
    options: &DiscoveryOptions,
) -> Result<RunOutcome> {
    run_at(client, credential, options, Utc::now()).await
}

/// Runs the whole pipeline as if invoked at `now`.
///
/// Creates a playlist only when at least one track qualifies; otherwise the
/// outcome is [`RunOutcome::NothingFound`].
pub async fn run_at(
    client: &SpotifyClient,
    credential: &Credential,
    options: &DiscoveryOptions,
    now: DateTime<Utc>,
) -> Result<RunOutcome> {
    let tracks = discover(client, credential, options, now).await?;
    if tracks.is_empty() {
        info!("{}", NOTHING_FOUND_MESSAGE);
        return Ok(RunOutcome::NothingFound);
    }

    let profile = spotify::user::get_current_user(client, credential)
        .await?
        .ok_or(DiscoveryError::CredentialExpired)?;

    let today = now.date_naive();
    let playlist_name = utils::playlist_name(today);
    let description = utils::playlist_description(today, options.lookback_days);

    let playlist = materialize(
        client,
        credential,
        &profile.id,
        &playlist_name,
        &description,
        &tracks,
    )
    .await?;

    info!(
        "Added {} tracks to playlist {}.",
        tracks.len(),
        playlist_name
    );

    let tracks_added = tracks.len();
    let playlist_url = playlist.external_urls.spotify.clone();
    let preview = tracks.into_iter().take(PREVIEW_LIMIT).collect();

    Ok(RunOutcome::Created(RunSummary {
        playlist,
        playlist_name,
        playlist_url,
        tracks_added,
        preview,
    }))
}

/// Collects, expands, filters and flattens without writing anything.
///
/// Returns the tracks in discovery order, duplicates included.
pub async fn discover(
    client: &SpotifyClient,
    credential: &Credential,
    options: &DiscoveryOptions,
    now: DateTime<Utc>,
) -> Result<Vec<Track>> {
    if credential.is_expired_at(now) {
        warning!(
            "Credential expired at {}; the service will likely reject it.",
            credential.expires_at
        );
    }

    let window_start = utils::window_start(now.naive_utc(), options.lookback_days)
        .ok_or(DiscoveryError::InvalidWindow(options.lookback_days))?;

    let followed = collect_followed_artists(client, credential).await?;
    info!("Found {} followed artists.", followed.len());

    let artist_set = expand(client, credential, &followed, options).await?;
    let artist_ids = artist_set.capped(options.total_cap);
    info!("Checking releases of {} artists.", artist_ids.len());

    let releases = filter_recent(client, credential, &artist_ids, window_start, options).await?;

    let tracks: Vec<Track> = releases
        .iter()
        .flat_map(|(album, tracks)| flatten(album, tracks))
        .collect();

    info!(
        "Found {} tracks on {} recent releases.",
        tracks.len(),
        releases.len()
    );

    Ok(tracks)
}
