use crate::{
    error::Result,
    spotify::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest, Credential,
        Playlist,
    },
};

/// Hard limit of URIs accepted by one add-tracks call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Creates a private, non-collaborative playlist owned by `user_id`.
pub async fn create(
    client: &SpotifyClient,
    credential: &Credential,
    user_id: &str,
    name: &str,
    description: &str,
) -> Result<Option<Playlist>> {
    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: false,
        collaborative: false,
    };

    let path = format!("/users/{user_id}/playlists", user_id = user_id);
    client.post(credential, &path, &request).await
}

/// Appends `uris` to the end of a playlist.
///
/// Callers must keep `uris` at or below [`MAX_TRACKS_PER_REQUEST`].
pub async fn add_tracks(
    client: &SpotifyClient,
    credential: &Credential,
    playlist_id: &str,
    uris: Vec<String>,
) -> Result<Option<AddTrackToPlaylistResponse>> {
    let path = format!("/playlists/{playlist_id}/tracks", playlist_id = playlist_id);
    client
        .post(credential, &path, &AddTrackToPlaylistRequest { uris })
        .await
}
