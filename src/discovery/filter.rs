use chrono::NaiveDateTime;

use crate::{
    discovery::{DiscoveryOptions, fan_out},
    error::Result,
    spotify::{self, SpotifyClient},
    types::{Album, AlbumTrack, Credential},
    utils, warning,
};

/// A release inside the window together with its track listing.
pub type ReleaseWithTracks = (Album, Vec<AlbumTrack>);

/// Finds the releases of the first `options.total_cap` artists that came out
/// on or after `window_start`.
///
/// Only qualifying releases get their tracks fetched. Results follow artist
/// order, then the order the service lists each artist's releases in.
pub async fn filter_recent(
    client: &SpotifyClient,
    credential: &Credential,
    artist_ids: &[String],
    window_start: NaiveDateTime,
    options: &DiscoveryOptions,
) -> Result<Vec<ReleaseWithTracks>> {
    let artist_ids: Vec<String> = artist_ids.iter().take(options.total_cap).cloned().collect();
    let market = options.market.clone();
    let album_limit = options.album_limit;

    let per_artist = fan_out(&artist_ids, options.concurrency, |artist_id| {
        let client = client.clone();
        let credential = credential.clone();
        let market = market.clone();
        async move {
            recent_releases_for_artist(
                &client,
                &credential,
                &artist_id,
                &market,
                album_limit,
                window_start,
            )
            .await
        }
    })
    .await?;

    Ok(per_artist.into_iter().flatten().collect())
}

async fn recent_releases_for_artist(
    client: &SpotifyClient,
    credential: &Credential,
    artist_id: &str,
    market: &str,
    album_limit: u32,
    window_start: NaiveDateTime,
) -> Result<Vec<ReleaseWithTracks>> {
    let Some(albums) =
        spotify::releases::get_releases_for_artist(client, credential, artist_id, market, album_limit)
            .await?
    else {
        warning!(
            "Credential rejected while listing releases of {}; skipping.",
            artist_id
        );
        return Ok(Vec::new());
    };

    let mut releases = Vec::new();

    for album in albums {
        let Some(released) = utils::parse_release_date(&album.release_date) else {
            warning!(
                "Cannot parse release date '{}' of album {}; skipping.",
                album.release_date,
                album.name
            );
            continue;
        };

        if !utils::is_within_window(released, window_start) {
            continue;
        }

        match spotify::releases::get_album_tracks(client, credential, &album.id).await? {
            Some(tracks) => releases.push((album, tracks)),
            None => warning!(
                "Credential rejected while listing tracks of {}; skipping.",
                album.name
            ),
        }
    }

    Ok(releases)
}
