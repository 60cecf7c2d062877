use crate::types::{Album, AlbumTrack, Track};

/// Folds the album's primary artist, name and release date into each track.
///
/// Keeps every track in listing order. Nothing is filtered or deduplicated.
pub fn flatten(album: &Album, tracks: &[AlbumTrack]) -> Vec<Track> {
    tracks
        .iter()
        .map(|track| Track {
            uri: track.uri.clone(),
            name: track.name.clone(),
            artist: album.primary_artist().to_string(),
            album: album.name.clone(),
            release_date: album.release_date.clone(),
        })
        .collect()
}
