use crate::{
    error::Result,
    spotify::SpotifyClient,
    types::{Album, AlbumResponse, AlbumTrack, AlbumTracksResponse, Credential},
};

/// Release groups requested per artist. Compilations and appearances are left out.
pub const RELEASE_GROUPS: &str = "album,single";

/// Maximum page size of the album tracks endpoint.
pub const ALBUM_TRACKS_LIMIT: u32 = 50;

/// Retrieves the most recent albums and singles of an artist.
///
/// Spotify returns an artist's releases newest first, so `limit` bounds how
/// far back the listing reaches. Only releases available in `market` are
/// returned.
pub async fn get_releases_for_artist(
    client: &SpotifyClient,
    credential: &Credential,
    artist_id: &str,
    market: &str,
    limit: u32,
) -> Result<Option<Vec<Album>>> {
    let path = format!("/artists/{id}/albums", id = artist_id);
    let query = [
        ("include_groups", RELEASE_GROUPS.to_string()),
        ("market", market.to_string()),
        ("limit", limit.to_string()),
    ];

    let response: Option<AlbumResponse> = client.get(credential, &path, &query).await?;
    Ok(response.map(|r| r.items))
}

pub async fn get_album_tracks(
    client: &SpotifyClient,
    credential: &Credential,
    album_id: &str,
) -> Result<Option<Vec<AlbumTrack>>> {
    let path = format!("/albums/{id}/tracks", id = album_id);
    let query = [("limit", ALBUM_TRACKS_LIMIT.to_string())];

    let response: Option<AlbumTracksResponse> = client.get(credential, &path, &query).await?;
    Ok(response.map(|r| r.items))
}
