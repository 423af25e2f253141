#![allow(dead_code)]

use std::sync::Mutex;

use radarcli::Res;
use radarcli::error::Error;
use radarcli::management::Catalog;
use radarcli::types::{
    AddTracksResponse, AlbumArtist, AlbumDetail, AlbumTrack, AlbumTracksPage,
    CreatePlaylistRequest, CreatePlaylistResponse, PlaylistOwner, PlaylistResponse,
    PlaylistTrack, PlaylistTrackItem, PlaylistTracksPage, SearchAlbum, SearchAlbumsPage,
    TrackAlbum, UserPlaylist, UserPlaylistsResponse,
};

/// One recorded catalog request.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetPlaylist {
        playlist_id: String,
        limit: u32,
    },
    GetAlbums {
        album_ids: Vec<String>,
    },
    GetAlbumTracks {
        album_id: String,
        limit: u32,
        offset: u64,
    },
    SearchAlbums {
        album_name: String,
        artist_name: String,
        limit: u32,
        offset: u64,
    },
    CreatePlaylist {
        user_id: String,
        name: String,
    },
    AddTracks {
        playlist_id: String,
        uris: Vec<String>,
    },
    UserPlaylists {
        user_id: String,
        limit: u32,
    },
    UnfollowPlaylist {
        playlist_id: String,
    },
}

/// In-memory catalog recording every request it receives.
///
/// Albums are served from a fixed pool by id; search responses and extra
/// track pages are consumed front-first, one per request.
#[derive(Default)]
pub struct FakeCatalog {
    pub playlist: Option<PlaylistResponse>,
    pub albums: Vec<AlbumDetail>,
    pub search_pages: Mutex<Vec<SearchAlbumsPage>>,
    pub search_fails: bool,
    pub track_pages: Mutex<Vec<AlbumTracksPage>>,
    pub user_playlists: Option<UserPlaylistsResponse>,
    /// 1-based index of the add-tracks request that fails.
    pub fail_add_tracks_at: Option<usize>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn count_add_tracks(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, Call::AddTracks { .. }))
            .count()
    }
}

impl Catalog for FakeCatalog {
    async fn get_playlist(&self, playlist_id: &str, limit: u32) -> Res<PlaylistResponse> {
        self.record(Call::GetPlaylist {
            playlist_id: playlist_id.to_string(),
            limit,
        });
        self.playlist
            .clone()
            .ok_or_else(|| Error::Catalog("no playlist configured".to_string()))
    }

    async fn get_albums(&self, album_ids: &[String]) -> Res<Vec<AlbumDetail>> {
        self.record(Call::GetAlbums {
            album_ids: album_ids.to_vec(),
        });
        Ok(album_ids
            .iter()
            .filter_map(|id| self.albums.iter().find(|album| &album.id == id).cloned())
            .collect())
    }

    async fn get_album_tracks(
        &self,
        album_id: &str,
        limit: u32,
        offset: u64,
    ) -> Res<AlbumTracksPage> {
        self.record(Call::GetAlbumTracks {
            album_id: album_id.to_string(),
            limit,
            offset,
        });
        let mut pages = self.track_pages.lock().unwrap();
        if pages.is_empty() {
            return Err(Error::Catalog("no track page configured".to_string()));
        }
        Ok(pages.remove(0))
    }

    async fn search_albums(
        &self,
        album_name: &str,
        artist_name: &str,
        limit: u32,
        offset: u64,
    ) -> Res<SearchAlbumsPage> {
        self.record(Call::SearchAlbums {
            album_name: album_name.to_string(),
            artist_name: artist_name.to_string(),
            limit,
            offset,
        });
        if self.search_fails {
            return Err(Error::Search("API responded with 500".to_string()));
        }
        let mut pages = self.search_pages.lock().unwrap();
        if pages.is_empty() {
            return Ok(SearchAlbumsPage {
                items: Vec::new(),
                total: 0,
            });
        }
        Ok(pages.remove(0))
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        self.record(Call::CreatePlaylist {
            user_id: user_id.to_string(),
            name: request.name.clone(),
        });
        Ok(CreatePlaylistResponse {
            id: "generated-playlist".to_string(),
            name: request.name.clone(),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<AddTracksResponse> {
        self.record(Call::AddTracks {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
        });
        if self.fail_add_tracks_at == Some(self.count_add_tracks()) {
            return Err(Error::Catalog("add tracks failed".to_string()));
        }
        Ok(AddTracksResponse {
            snapshot_id: "snapshot".to_string(),
        })
    }

    async fn user_playlists(&self, user_id: &str, limit: u32) -> Res<UserPlaylistsResponse> {
        self.record(Call::UserPlaylists {
            user_id: user_id.to_string(),
            limit,
        });
        self.user_playlists
            .clone()
            .ok_or_else(|| Error::Catalog("no user playlists configured".to_string()))
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Res<()> {
        self.record(Call::UnfollowPlaylist {
            playlist_id: playlist_id.to_string(),
        });
        Ok(())
    }
}

pub fn album_with_tracks(
    id: &str,
    name: &str,
    artist: Option<&str>,
    tracks: &[(&str, bool)],
    total: u64,
) -> AlbumDetail {
    AlbumDetail {
        id: id.to_string(),
        name: name.to_string(),
        artists: artist
            .map(|artist_name| {
                vec![AlbumArtist {
                    id: format!("{}-artist", id),
                    name: artist_name.to_string(),
                }]
            })
            .unwrap_or_default(),
        tracks: AlbumTracksPage {
            items: tracks
                .iter()
                .map(|(uri, explicit)| AlbumTrack {
                    uri: uri.to_string(),
                    explicit: *explicit,
                })
                .collect(),
            total,
        },
    }
}

pub fn search_album(id: &str, name: &str, artist: &str, album_type: &str) -> SearchAlbum {
    SearchAlbum {
        id: id.to_string(),
        name: name.to_string(),
        album_type: album_type.to_string(),
        artists: vec![AlbumArtist {
            id: format!("{}-artist", id),
            name: artist.to_string(),
        }],
    }
}

pub fn search_page(items: Vec<SearchAlbum>, total: u64) -> SearchAlbumsPage {
    SearchAlbumsPage { items, total }
}

pub fn track_page(uris: &[&str]) -> AlbumTracksPage {
    AlbumTracksPage {
        items: uris
            .iter()
            .map(|uri| AlbumTrack {
                uri: uri.to_string(),
                explicit: false,
            })
            .collect(),
        total: uris.len() as u64,
    }
}

pub fn source_playlist(album_refs: &[(&str, &str)], total: u64, limit: u64) -> PlaylistResponse {
    PlaylistResponse {
        tracks: PlaylistTracksPage {
            items: album_refs
                .iter()
                .map(|(album_id, album_type)| PlaylistTrackItem {
                    track: Some(PlaylistTrack {
                        album: TrackAlbum {
                            id: album_id.to_string(),
                            name: format!("{} name", album_id),
                            album_type: album_type.to_string(),
                        },
                    }),
                })
                .collect(),
            total,
            limit,
        },
    }
}

pub fn user_playlist(id: &str, name: &str, owner: &str) -> UserPlaylist {
    UserPlaylist {
        id: id.to_string(),
        name: name.to_string(),
        owner: PlaylistOwner {
            id: owner.to_string(),
        },
    }
}

pub fn user_playlists(items: Vec<UserPlaylist>, total: u64, limit: u64) -> UserPlaylistsResponse {
    UserPlaylistsResponse {
        items,
        total,
        limit,
    }
}
