use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<Token>,
}

/// Bearer credential handed to every remote call.
///
/// The pipeline only reads it; refreshing is the caller's job.
#[derive(Debug, Clone)]
pub struct Credential {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl From<&Token> for Credential {
    fn from(token: &Token) -> Self {
        let obtained_at =
            DateTime::<Utc>::from_timestamp(token.obtained_at as i64, 0).unwrap_or_else(Utc::now);
        Self {
            access_token: token.access_token.clone(),
            expires_at: obtained_at + Duration::seconds(token.expires_in as i64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    #[serde(default)]
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistsContainer {
    #[serde(default)]
    pub items: Vec<Artist>,
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedArtistsResponse {
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumResponse {
    #[serde(default)]
    pub items: Vec<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

impl Album {
    /// Name of the first credited artist, the one the album is attributed to.
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(|a| a.name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumTracksResponse {
    #[serde(default)]
    pub items: Vec<AlbumTrack>,
}

/// Track as listed on an album, before the album's metadata is folded in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

/// Playable track carrying the album metadata it was discovered through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub release_date: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub date: String,
    pub artist: String,
    pub album: String,
    pub name: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        Self {
            date: track.release_date.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            name: track.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

/// Playlist created by a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    #[serde(default)]
    pub snapshot_id: String,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub playlist: Playlist,
    pub playlist_name: String,
    pub playlist_url: String,
    pub tracks_added: usize,
    pub preview: Vec<Track>,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Created(RunSummary),
    NothingFound,
}
