use std::collections::HashSet;

use crate::{
    info,
    management::catalog::Catalog,
    types::{AlbumDetail, SearchAlbum},
    utils, warning,
};
use crate::Res;

/// Maximum number of album ids per batch request.
pub const ALBUM_BATCH_LIMIT: usize = 20;
/// Page size used for album search requests.
pub const SEARCH_PAGE_LIMIT: u32 = 50;

/// Resolves ambiguous album references to their preferred edition.
///
/// The catalog frequently lists several editions of the same album (clean and
/// explicit versions, deluxe reissues) without any link between them, and the
/// source playlist tends to reference the least interesting one. For every
/// album id the resolver searches for same-named albums by the same artist
/// and, when the listing is ambiguous, picks an explicit edition if one
/// exists and the longest edition otherwise.
pub struct AlbumResolver<'a, C: Catalog> {
    catalog: &'a C,
}

impl<'a, C: Catalog> AlbumResolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        AlbumResolver { catalog }
    }

    /// Maps each distinct album id to the full record of its preferred
    /// edition.
    ///
    /// Base albums are fetched in batches of at most 20 ids and the returned
    /// list preserves that batch order. An album is kept as-is when it has no
    /// primary artist, when search turns up at most one exact match, or when
    /// the search request fails. With two or more matches, the full records
    /// of all candidates are fetched and the first one containing an explicit
    /// track wins; if none does, the first candidate with the maximal track
    /// count is used.
    pub async fn resolve_preferred_albums(
        &self,
        album_ids: &HashSet<String>,
    ) -> Res<Vec<AlbumDetail>> {
        let ids: Vec<String> = album_ids.iter().cloned().collect();
        let base_albums = self.fetch_albums_by_ids(&ids).await?;

        let mut resolved = Vec::with_capacity(base_albums.len());
        for album in base_albums {
            info!("Fetching matching albums for \"{}\"", album.name);

            let Some(artist_name) = album.artists.first().map(|a| a.name.clone()) else {
                info!("  No artist found, using default version");
                resolved.push(album);
                continue;
            };

            let matches = self.exact_search_matches(&album.name, &artist_name).await;
            if matches.len() <= 1 {
                info!("  Only one version found, using default");
                resolved.push(album);
                continue;
            }

            let match_ids: Vec<String> = matches.iter().map(|m| m.id.clone()).collect();
            let candidates = self.fetch_albums_by_ids(&match_ids).await?;
            resolved.push(pick_preferred(candidates, album));
        }

        Ok(resolved)
    }

    async fn fetch_albums_by_ids(&self, album_ids: &[String]) -> Res<Vec<AlbumDetail>> {
        let mut albums = Vec::with_capacity(album_ids.len());
        for chunk in album_ids.chunks(ALBUM_BATCH_LIMIT) {
            albums.extend(self.catalog.get_albums(chunk).await?);
        }
        Ok(albums)
    }

    /// Collects search results whose cleaned name and primary artist exactly
    /// match the queried album, excluding singles.
    ///
    /// Pages through results 50 at a time. The loop bound follows the total
    /// reported by the most recent response, so the loop terminates even when
    /// the reported total shrinks between pages. Any search failure is logged
    /// and yields no matches.
    async fn exact_search_matches(&self, album_name: &str, artist_name: &str) -> Vec<SearchAlbum> {
        let clean_name = utils::clean_query_name(album_name);
        let clean_artist = utils::clean_query_name(artist_name);

        let mut matches = Vec::new();
        let mut offset: u64 = 0;
        // Assume a single page until the first response reports the real total.
        let mut total = SEARCH_PAGE_LIMIT as u64;

        while offset < total {
            let page = match self
                .catalog
                .search_albums(&clean_name, &clean_artist, SEARCH_PAGE_LIMIT, offset)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warning!(
                        "Search for \"{}\" by \"{}\" failed: {}",
                        album_name,
                        artist_name,
                        e
                    );
                    return Vec::new();
                }
            };

            total = page.total;
            matches.extend(page.items.into_iter().filter(|candidate| {
                candidate.album_type != "single"
                    && utils::clean_query_name(&candidate.name) == clean_name
                    && candidate
                        .artists
                        .first()
                        .map(|a| utils::clean_query_name(&a.name))
                        .as_deref()
                        == Some(clean_artist.as_str())
            }));
            offset += SEARCH_PAGE_LIMIT as u64;
        }

        if matches.is_empty() {
            warning!(
                "Failed to find \"{}\" by \"{}\" in search",
                album_name,
                artist_name
            );
        }
        matches
    }
}

/// Picks the preferred edition among ambiguous candidates.
///
/// The first candidate (in search order) with at least one explicit track
/// wins. Otherwise the first candidate whose reported track count equals the
/// maximum wins. The fallback only applies when the candidate fetch returned
/// nothing.
fn pick_preferred(candidates: Vec<AlbumDetail>, fallback: AlbumDetail) -> AlbumDetail {
    if let Some(explicit) = candidates
        .iter()
        .find(|c| c.tracks.items.iter().any(|t| t.explicit))
    {
        info!("  Explicit version found, using explicit version");
        return explicit.clone();
    }

    info!("  Using default version");
    let max_tracks = candidates.iter().map(|c| c.tracks.total).max().unwrap_or(0);
    candidates
        .into_iter()
        .find(|c| c.tracks.total == max_tracks)
        .unwrap_or(fallback)
}
