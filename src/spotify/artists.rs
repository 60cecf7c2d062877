use crate::{
    error::Result,
    spotify::SpotifyClient,
    types::{Artist, ArtistsContainer, Credential, FollowedArtistsResponse, RelatedArtistsResponse},
};

/// Retrieves one page of the user's followed artists.
///
/// Spotify paginates this listing with an opaque `after` cursor rather than an
/// offset. Pass the cursor from the previous page's `cursors.after` to get the
/// next one; `next` is `None` on the last page.
///
/// # Arguments
///
/// * `client` - API client
/// * `credential` - bearer credential for the user
/// * `limit` - page size (1-50)
/// * `after` - cursor returned by the previous page, `None` for the first page
///
/// # Returns
///
/// - `Ok(Some(page))` - the page, with `items`, `next` and `cursors`
/// - `Ok(None)` - the credential was rejected
/// - `Err(_)` - transport failure, unexpected status or malformed body
pub async fn get_followed_artists(
    client: &SpotifyClient,
    credential: &Credential,
    limit: u32,
    after: Option<&str>,
) -> Result<Option<ArtistsContainer>> {
    let mut query = vec![("type", "artist".to_string()), ("limit", limit.to_string())];
    if let Some(after) = after {
        query.push(("after", after.to_string()));
    }

    let response: Option<FollowedArtistsResponse> =
        client.get(credential, "/me/following", &query).await?;

    Ok(response.map(|r| r.artists))
}

/// Retrieves the artists Spotify lists as related to `artist_id`.
///
/// The order is Spotify's own relevance ranking and is kept as-is.
pub async fn get_related_artists(
    client: &SpotifyClient,
    credential: &Credential,
    artist_id: &str,
) -> Result<Option<Vec<Artist>>> {
    let path = format!("/artists/{id}/related-artists", id = artist_id);
    let response: Option<RelatedArtistsResponse> = client.get(credential, &path, &[]).await?;

    Ok(response.map(|r| r.artists))
}
