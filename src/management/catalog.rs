use crate::{
    Res,
    types::{
        AddTracksResponse, AlbumDetail, AlbumTracksPage, CreatePlaylistRequest,
        CreatePlaylistResponse, PlaylistResponse, SearchAlbumsPage, UserPlaylistsResponse,
    },
};

/// Catalog operations the resolver and aggregator depend on.
///
/// Implemented by [`crate::spotify::SpotifyClient`] against the live Web API
/// and by in-memory fakes in tests. Callers own batching and pagination; an
/// implementation performs exactly one request per call.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Fetches a playlist with a single page of its tracks.
    async fn get_playlist(&self, playlist_id: &str, limit: u32) -> Res<PlaylistResponse>;

    /// Fetches full album records for up to 20 ids, in request order.
    async fn get_albums(&self, album_ids: &[String]) -> Res<Vec<AlbumDetail>>;

    /// Fetches one page of an album's tracks.
    async fn get_album_tracks(
        &self,
        album_id: &str,
        limit: u32,
        offset: u64,
    ) -> Res<AlbumTracksPage>;

    /// Searches recent albums matching the given album and artist name.
    ///
    /// Failures are reported as [`crate::error::Error::Search`] so callers
    /// can recover locally.
    async fn search_albums(
        &self,
        album_name: &str,
        artist_name: &str,
        limit: u32,
        offset: u64,
    ) -> Res<SearchAlbumsPage>;

    /// Creates a playlist owned by the given user.
    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse>;

    /// Appends up to 100 track URIs to a playlist.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<AddTracksResponse>;

    /// Lists a single page of the user's playlists.
    async fn user_playlists(&self, user_id: &str, limit: u32) -> Res<UserPlaylistsResponse>;

    /// Unfollows (removes) a playlist.
    async fn unfollow_playlist(&self, playlist_id: &str) -> Res<()>;
}
