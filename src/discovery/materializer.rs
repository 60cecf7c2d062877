use crate::{
    error::{DiscoveryError, Result},
    spotify::{self, SpotifyClient, playlist::MAX_TRACKS_PER_REQUEST},
    types::{Credential, Playlist, Track},
};

/// Creates one private playlist and appends `tracks` in input order.
///
/// Tracks are written in sequential batches of at most 100 URIs. A rejected
/// credential at any step is fatal. If a batch fails after the playlist was
/// created, the playlist stays on the account and the error is returned.
///
/// Callers skip this entirely when there are no tracks.
pub async fn materialize(
    client: &SpotifyClient,
    credential: &Credential,
    owner_id: &str,
    name: &str,
    description: &str,
    tracks: &[Track],
) -> Result<Playlist> {
    let playlist = spotify::playlist::create(client, credential, owner_id, name, description)
        .await?
        .ok_or(DiscoveryError::CredentialExpired)?;

    for batch in tracks.chunks(MAX_TRACKS_PER_REQUEST) {
        let uris: Vec<String> = batch.iter().map(|t| t.uri.clone()).collect();
        spotify::playlist::add_tracks(client, credential, &playlist.id, uris)
            .await?
            .ok_or(DiscoveryError::CredentialExpired)?;
    }

    Ok(playlist)
}
