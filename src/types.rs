use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::{Mutex, oneshot};

use crate::config::Credentials;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Shared state between the OAuth flow and the callback handler.
///
/// The sender resolves exactly once; the flow awaits the matching receiver
/// under a timeout.
pub struct AuthCallback {
    pub expected_state: String,
    pub code_tx: Mutex<Option<oneshot::Sender<String>>>,
}

/// Shared state for the long-running server mode.
pub struct ServeContext {
    pub credentials: Credentials,
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub tracks: PlaylistTracksPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    pub items: Vec<PlaylistTrackItem>,
    pub total: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub album: TrackAlbum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub id: String,
    pub name: String,
    pub album_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralAlbumsResponse {
    pub albums: Vec<AlbumDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumDetail {
    pub id: String,
    pub name: String,
    pub artists: Vec<AlbumArtist>,
    pub tracks: AlbumTracksPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTracksPage {
    pub items: Vec<AlbumTrack>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTrack {
    pub uri: String,
    #[serde(default)]
    pub explicit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAlbumsResponse {
    pub albums: SearchAlbumsPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAlbumsPage {
    pub items: Vec<SearchAlbum>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAlbum {
    pub id: String,
    pub name: String,
    pub album_type: String,
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylistsResponse {
    pub items: Vec<UserPlaylist>,
    pub total: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Tabled)]
pub struct ResolvedAlbumRow {
    pub album: String,
    pub artist: String,
    pub tracks: u64,
}
