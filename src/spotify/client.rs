use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    Res,
    config,
    error::Error,
    management::catalog::Catalog,
    types::{
        AddTracksRequest, AddTracksResponse, AlbumDetail, AlbumTracksPage, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, PlaylistResponse, SearchAlbumsPage,
        SearchAlbumsResponse, SeveralAlbumsResponse, UserPlaylistsResponse,
    },
};

/// Spotify Web API client bound to one access token.
///
/// Implements [`Catalog`] with one HTTP request per call. Batch and page
/// limits are enforced by the callers, matching the API's documented
/// constraints (20 ids per album batch, 50 results per search page, 100
/// URIs per track add).
pub struct SpotifyClient {
    http: Client,
    token: String,
}

impl SpotifyClient {
    pub fn new(token: String) -> Self {
        SpotifyClient {
            http: Client::new(),
            token,
        }
    }

    /// Returns the profile of the user the token belongs to.
    ///
    /// Used by server mode, where the acting user is whoever completed the
    /// browser login rather than a configured id.
    pub async fn current_user(&self) -> Res<CurrentUser> {
        let api_url = format!("{}/me", config::SPOTIFY_API_URL);
        self.get_json(&api_url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, api_url: &str) -> Res<T> {
        let response = self
            .http
            .get(api_url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

impl Catalog for SpotifyClient {
    async fn get_playlist(&self, playlist_id: &str, limit: u32) -> Res<PlaylistResponse> {
        let api_url = format!(
            "{uri}/playlists/{id}?limit={limit}",
            uri = config::SPOTIFY_API_URL,
            id = playlist_id,
            limit = limit
        );
        self.get_json(&api_url).await
    }

    async fn get_albums(&self, album_ids: &[String]) -> Res<Vec<AlbumDetail>> {
        let api_url = format!(
            "{uri}/albums?ids={ids}",
            uri = config::SPOTIFY_API_URL,
            ids = album_ids.join(",")
        );
        let response: SeveralAlbumsResponse = self.get_json(&api_url).await?;
        Ok(response.albums)
    }

    async fn get_album_tracks(
        &self,
        album_id: &str,
        limit: u32,
        offset: u64,
    ) -> Res<AlbumTracksPage> {
        let api_url = format!(
            "{uri}/albums/{id}/tracks?limit={limit}&offset={offset}",
            uri = config::SPOTIFY_API_URL,
            id = album_id,
            limit = limit,
            offset = offset
        );
        self.get_json(&api_url).await
    }

    // Search failures map to Error::Search so the resolver can fall back to
    // the original album instead of aborting the run.
    async fn search_albums(
        &self,
        album_name: &str,
        artist_name: &str,
        limit: u32,
        offset: u64,
    ) -> Res<SearchAlbumsPage> {
        let limit = limit.to_string();
        let offset = offset.to_string();
        // tag:new limits results to albums released in the last two weeks
        let query = format!("album:{} artist:{} tag:new", album_name, artist_name);

        let response = self
            .http
            .get(format!("{}/search", config::SPOTIFY_API_URL))
            .query(&[
                ("type", "album"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
                ("locale", "GB"),
                ("q", query.as_str()),
            ])
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Search(format!(
                "API responded with {}",
                response.status()
            )));
        }

        let body: SearchAlbumsResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;
        Ok(body.albums)
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        let api_url = format!(
            "{uri}/users/{id}/playlists",
            uri = config::SPOTIFY_API_URL,
            id = user_id
        );
        let response = self
            .http
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<CreatePlaylistResponse>().await?)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<AddTracksResponse> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = config::SPOTIFY_API_URL,
            id = playlist_id
        );
        let request = AddTracksRequest {
            uris: uris.to_vec(),
        };
        let response = self
            .http
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<AddTracksResponse>().await?)
    }

    async fn user_playlists(&self, user_id: &str, limit: u32) -> Res<UserPlaylistsResponse> {
        let api_url = format!(
            "{uri}/users/{id}/playlists?limit={limit}",
            uri = config::SPOTIFY_API_URL,
            id = user_id,
            limit = limit
        );
        self.get_json(&api_url).await
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Res<()> {
        let api_url = format!(
            "{uri}/playlists/{id}/followers",
            uri = config::SPOTIFY_API_URL,
            id = playlist_id
        );
        self.http
            .delete(&api_url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
