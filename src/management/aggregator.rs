use std::collections::HashSet;

use chrono::Local;

use crate::{
    Res,
    error::Error,
    info,
    management::{catalog::Catalog, resolver::AlbumResolver},
    types::{AlbumDetail, CreatePlaylistRequest, CreatePlaylistResponse, UserPlaylist},
    utils,
};

/// Single-page limit used when fetching the source playlist.
pub const SOURCE_PLAYLIST_LIMIT: u32 = 1000;
/// Single-page limit used when listing the user's playlists.
pub const USER_PLAYLIST_LIMIT: u32 = 50;
/// Maximum number of track URIs per add request.
pub const ADD_TRACKS_LIMIT: usize = 100;
/// Page size used when fetching album tracks beyond the embedded first page.
pub const ALBUM_TRACKS_PAGE_LIMIT: u32 = 50;

/// Description attached to every generated playlist.
pub const PLAYLIST_DESCRIPTION: &str = "Album releases from your Release Radar";

/// Name of the curated source playlist, as published by the catalog.
pub const SOURCE_PLAYLIST_NAME: &str = "Release Radar";
/// Owner of the curated source playlist.
pub const SOURCE_PLAYLIST_OWNER: &str = "spotify";

/// Builds the full-album track list for a source playlist and publishes it.
///
/// All catalog calls are sequential; nothing is retried and the first fatal
/// failure aborts the run before any old playlist is touched.
pub struct PlaylistAggregator<'a, C: Catalog> {
    catalog: &'a C,
}

impl<'a, C: Catalog> PlaylistAggregator<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        PlaylistAggregator { catalog }
    }

    /// Resolves the preferred edition of every album referenced by the
    /// source playlist.
    ///
    /// Only tracks whose parent is album-typed count; singles and
    /// compilations are skipped. Referenced album ids are deduplicated
    /// before resolution. A source playlist larger than one page is rejected
    /// rather than truncated.
    pub async fn resolve_source_albums(&self, source_playlist_id: &str) -> Res<Vec<AlbumDetail>> {
        let playlist = self
            .catalog
            .get_playlist(source_playlist_id, SOURCE_PLAYLIST_LIMIT)
            .await?;
        if playlist.tracks.total > playlist.tracks.limit {
            return Err(Error::PaginationUnsupported {
                what: "source playlist tracks",
                total: playlist.tracks.total,
                limit: playlist.tracks.limit,
            });
        }

        let album_ids: HashSet<String> = playlist
            .tracks
            .items
            .iter()
            .filter_map(|item| item.track.as_ref())
            .filter(|track| track.album.album_type == "album")
            .map(|track| track.album.id.clone())
            .collect();

        AlbumResolver::new(self.catalog)
            .resolve_preferred_albums(&album_ids)
            .await
    }

    /// Flattens resolved albums into one ordered track URI list.
    ///
    /// The embedded track listing covers the first page only; albums
    /// reporting more tracks are paged through 50 at a time. URIs keep
    /// album order, then in-album order. Tracks appearing on several
    /// resolved albums appear several times in the output.
    pub async fn flatten_track_uris(&self, albums: &[AlbumDetail]) -> Res<Vec<String>> {
        let mut track_uris = Vec::new();
        for album in albums {
            let mut uris: Vec<String> = album.tracks.items.iter().map(|t| t.uri.clone()).collect();

            let mut offset = ALBUM_TRACKS_PAGE_LIMIT as u64;
            while offset < album.tracks.total {
                let page = self
                    .catalog
                    .get_album_tracks(&album.id, ALBUM_TRACKS_PAGE_LIMIT, offset)
                    .await?;
                uris.extend(page.items.into_iter().map(|t| t.uri));
                offset += ALBUM_TRACKS_PAGE_LIMIT as u64;
            }

            track_uris.append(&mut uris);
        }
        Ok(track_uris)
    }

    /// Builds the complete track URI list for the given source playlist.
    pub async fn build_release_radar_track_list(
        &self,
        source_playlist_id: &str,
    ) -> Res<Vec<String>> {
        let albums = self.resolve_source_albums(source_playlist_id).await?;
        self.flatten_track_uris(&albums).await
    }

    /// Publishes the track list as a freshly created dated playlist.
    ///
    /// Stale playlists (owned by the user, name matching the generated
    /// pattern) are collected up front but unfollowed only after every track
    /// batch has been added, so a failed run leaves the previous generation
    /// in place. Tracks are added in order, at most 100 per request,
    /// consuming the input list until it is empty.
    pub async fn publish(
        &self,
        mut track_uris: Vec<String>,
        user_id: &str,
    ) -> Res<CreatePlaylistResponse> {
        let playlists = self
            .catalog
            .user_playlists(user_id, USER_PLAYLIST_LIMIT)
            .await?;
        if playlists.total > playlists.limit {
            return Err(Error::PaginationUnsupported {
                what: "user playlists",
                total: playlists.total,
                limit: playlists.limit,
            });
        }

        let stale: Vec<UserPlaylist> = playlists
            .items
            .into_iter()
            .filter(|p| p.owner.id == user_id && utils::is_generated_playlist_name(&p.name))
            .collect();

        let name = utils::generated_playlist_name(Local::now().date_naive());
        info!("Creating playlist \"{}\"", name);
        let created = self
            .catalog
            .create_playlist(
                user_id,
                &CreatePlaylistRequest {
                    name,
                    description: PLAYLIST_DESCRIPTION.to_string(),
                    public: false,
                    collaborative: false,
                },
            )
            .await?;

        info!("Adding {} tracks", track_uris.len());
        while !track_uris.is_empty() {
            let batch: Vec<String> = track_uris
                .drain(..ADD_TRACKS_LIMIT.min(track_uris.len()))
                .collect();
            self.catalog.add_tracks(&created.id, &batch).await?;
        }

        info!("Removing {} old playlist(s)", stale.len());
        for playlist in stale {
            self.catalog.unfollow_playlist(&playlist.id).await?;
        }

        Ok(created)
    }

    /// Looks up the catalog-curated source playlist in the user's library.
    ///
    /// Exactly one playlist owned by the catalog and named after the source
    /// must exist; none or several is an error.
    pub async fn find_source_playlist(&self, user_id: &str) -> Res<String> {
        let playlists = self
            .catalog
            .user_playlists(user_id, USER_PLAYLIST_LIMIT)
            .await?;
        if playlists.total > playlists.limit {
            return Err(Error::PaginationUnsupported {
                what: "user playlists",
                total: playlists.total,
                limit: playlists.limit,
            });
        }

        let mut found = playlists.items.into_iter().filter(|p| {
            p.owner.id == SOURCE_PLAYLIST_OWNER && p.name == SOURCE_PLAYLIST_NAME
        });

        let Some(first) = found.next() else {
            return Err(Error::Config(format!(
                "could not find the \"{}\" playlist; set \"source_playlist_id\" in config.json",
                SOURCE_PLAYLIST_NAME
            )));
        };
        if found.next().is_some() {
            return Err(Error::Config(format!(
                "found multiple \"{}\" playlists; set \"source_playlist_id\" in config.json",
                SOURCE_PLAYLIST_NAME
            )));
        }
        Ok(first.id)
    }
}
