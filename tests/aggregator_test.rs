mod common;

use common::{
    Call, FakeCatalog, album_with_tracks, source_playlist, track_page, user_playlist,
    user_playlists,
};
use radarcli::error::Error;
use radarcli::management::PlaylistAggregator;
use radarcli::types::PlaylistTrackItem;
use radarcli::utils;

#[tokio::test]
async fn track_list_concatenates_album_tracks_without_dedup() {
    let mut playlist = source_playlist(
        &[
            ("album-one", "album"),
            ("album-two", "album"),
            ("album-one", "album"),
            ("single-one", "single"),
        ],
        5,
        1000,
    );
    // local file entries come back without a track object
    playlist.tracks.items.push(PlaylistTrackItem { track: None });

    let catalog = FakeCatalog {
        playlist: Some(playlist),
        albums: vec![
            album_with_tracks(
                "album-one",
                "One",
                None,
                &[("spotify:track:t1", false), ("spotify:track:t2", false)],
                2,
            ),
            album_with_tracks(
                "album-two",
                "Two",
                None,
                &[("spotify:track:t2", false), ("spotify:track:t3", false)],
                2,
            ),
        ],
        ..Default::default()
    };

    let aggregator = PlaylistAggregator::new(&catalog);
    let track_uris = aggregator
        .build_release_radar_track_list("source")
        .await
        .unwrap();

    // two distinct albums of two tracks each; the single is skipped
    assert_eq!(track_uris.len(), 4);

    // tracks shared between albums stay duplicated in the output
    let duplicates = track_uris
        .iter()
        .filter(|uri| uri.as_str() == "spotify:track:t2")
        .count();
    assert_eq!(duplicates, 2);

    // output follows batch-fetch album order, in-album order within
    let fetched_ids: Vec<String> = catalog
        .calls()
        .iter()
        .filter_map(|call| match call {
            Call::GetAlbums { album_ids } => Some(album_ids.clone()),
            _ => None,
        })
        .flatten()
        .collect();
    let expected: Vec<String> = fetched_ids
        .iter()
        .flat_map(|id| match id.as_str() {
            "album-one" => vec!["spotify:track:t1", "spotify:track:t2"],
            _ => vec!["spotify:track:t2", "spotify:track:t3"],
        })
        .map(String::from)
        .collect();
    assert_eq!(track_uris, expected);
}

#[tokio::test]
async fn oversized_source_playlist_fails_fast() {
    let catalog = FakeCatalog {
        playlist: Some(source_playlist(&[("album-one", "album")], 1500, 1000)),
        ..Default::default()
    };

    let aggregator = PlaylistAggregator::new(&catalog);
    let result = aggregator.build_release_radar_track_list("source").await;

    assert!(matches!(
        result,
        Err(Error::PaginationUnsupported { total: 1500, .. })
    ));
    assert_eq!(catalog.calls().len(), 1, "no further requests after the guard");
}

#[tokio::test]
async fn album_tracks_beyond_the_first_page_are_fetched() {
    let catalog = FakeCatalog {
        playlist: Some(source_playlist(&[("big-album", "album")], 1, 1000)),
        albums: vec![album_with_tracks(
            "big-album",
            "Big",
            None,
            &[("spotify:track:i1", false), ("spotify:track:i2", false)],
            120,
        )],
        track_pages: vec![
            track_page(&["spotify:track:p1"]),
            track_page(&["spotify:track:p2"]),
        ]
        .into(),
        ..Default::default()
    };

    let aggregator = PlaylistAggregator::new(&catalog);
    let track_uris = aggregator
        .build_release_radar_track_list("source")
        .await
        .unwrap();

    assert_eq!(
        track_uris,
        vec![
            "spotify:track:i1",
            "spotify:track:i2",
            "spotify:track:p1",
            "spotify:track:p2",
        ]
    );

    let page_requests: Vec<(u32, u64)> = catalog
        .calls()
        .iter()
        .filter_map(|call| match call {
            Call::GetAlbumTracks { limit, offset, .. } => Some((*limit, *offset)),
            _ => None,
        })
        .collect();
    assert_eq!(page_requests, vec![(50, 50), (50, 100)]);
}

#[tokio::test]
async fn publish_adds_tracks_in_batches_of_one_hundred() {
    let catalog = FakeCatalog {
        user_playlists: Some(user_playlists(vec![], 0, 50)),
        ..Default::default()
    };

    let track_uris: Vec<String> = (0..250).map(|i| format!("spotify:track:{}", i)).collect();
    let aggregator = PlaylistAggregator::new(&catalog);
    aggregator
        .publish(track_uris.clone(), "user")
        .await
        .unwrap();

    let batches: Vec<Vec<String>> = catalog
        .calls()
        .iter()
        .filter_map(|call| match call {
            Call::AddTracks { uris, .. } => Some(uris.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(
        batches.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![100, 100, 50]
    );
    // original order is preserved across batches
    let flattened: Vec<String> = batches.into_iter().flatten().collect();
    assert_eq!(flattened, track_uris);
}

#[tokio::test]
async fn publish_retires_stale_playlists_only_after_population() {
    let catalog = FakeCatalog {
        user_playlists: Some(user_playlists(
            vec![
                user_playlist("old-radar", "Release Radar Albums (2024-1-5)", "user"),
                user_playlist("mix", "My Mix", "user"),
                user_playlist("foreign", "Release Radar Albums (2024-1-5)", "someone-else"),
            ],
            3,
            50,
        )),
        ..Default::default()
    };

    let aggregator = PlaylistAggregator::new(&catalog);
    aggregator
        .publish(vec!["spotify:track:t1".to_string()], "user")
        .await
        .unwrap();

    let calls = catalog.calls();
    let unfollowed: Vec<&str> = calls
        .iter()
        .filter_map(|call| match call {
            Call::UnfollowPlaylist { playlist_id } => Some(playlist_id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(unfollowed, vec!["old-radar"]);

    let last_add = calls
        .iter()
        .rposition(|call| matches!(call, Call::AddTracks { .. }))
        .unwrap();
    let unfollow = calls
        .iter()
        .position(|call| matches!(call, Call::UnfollowPlaylist { .. }))
        .unwrap();
    assert!(unfollow > last_add, "retirement must follow population");

    let created_name = calls
        .iter()
        .find_map(|call| match call {
            Call::CreatePlaylist { name, .. } => Some(name.clone()),
            _ => None,
        })
        .unwrap();
    assert!(utils::is_generated_playlist_name(&created_name));
}

#[tokio::test]
async fn failed_population_preserves_stale_playlists() {
    let catalog = FakeCatalog {
        user_playlists: Some(user_playlists(
            vec![user_playlist(
                "old-radar",
                "Release Radar Albums (2024-1-5)",
                "user",
            )],
            1,
            50,
        )),
        fail_add_tracks_at: Some(2),
        ..Default::default()
    };

    let track_uris: Vec<String> = (0..150).map(|i| format!("spotify:track:{}", i)).collect();
    let aggregator = PlaylistAggregator::new(&catalog);
    let result = aggregator.publish(track_uris, "user").await;

    assert!(result.is_err());
    assert!(
        !catalog
            .calls()
            .iter()
            .any(|call| matches!(call, Call::UnfollowPlaylist { .. })),
        "a partial run must not delete previous playlists"
    );
}

#[tokio::test]
async fn oversized_playlist_listing_fails_fast_before_creation() {
    let catalog = FakeCatalog {
        user_playlists: Some(user_playlists(vec![], 80, 50)),
        ..Default::default()
    };

    let aggregator = PlaylistAggregator::new(&catalog);
    let result = aggregator
        .publish(vec!["spotify:track:t1".to_string()], "user")
        .await;

    assert!(matches!(
        result,
        Err(Error::PaginationUnsupported { total: 80, .. })
    ));
    assert!(
        !catalog
            .calls()
            .iter()
            .any(|call| matches!(call, Call::CreatePlaylist { .. }))
    );
}

#[tokio::test]
async fn same_day_reruns_create_equally_named_playlists_without_error() {
    let catalog = FakeCatalog {
        user_playlists: Some(user_playlists(vec![], 0, 50)),
        ..Default::default()
    };

    let aggregator = PlaylistAggregator::new(&catalog);
    aggregator.publish(vec![], "user").await.unwrap();
    aggregator.publish(vec![], "user").await.unwrap();

    let names: Vec<String> = catalog
        .calls()
        .iter()
        .filter_map(|call| match call {
            Call::CreatePlaylist { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(names.len(), 2);
    assert_eq!(names[0], names[1]);
}

#[tokio::test]
async fn find_source_playlist_returns_the_curated_playlist() {
    let catalog = FakeCatalog {
        user_playlists: Some(user_playlists(
            vec![
                user_playlist("mine", "Release Radar", "user"),
                user_playlist("radar-id", "Release Radar", "spotify"),
            ],
            2,
            50,
        )),
        ..Default::default()
    };

    let aggregator = PlaylistAggregator::new(&catalog);
    let id = aggregator.find_source_playlist("user").await.unwrap();
    assert_eq!(id, "radar-id");
}

#[tokio::test]
async fn find_source_playlist_rejects_missing_and_ambiguous_results() {
    let missing = FakeCatalog {
        user_playlists: Some(user_playlists(vec![], 0, 50)),
        ..Default::default()
    };
    let aggregator = PlaylistAggregator::new(&missing);
    assert!(matches!(
        aggregator.find_source_playlist("user").await,
        Err(Error::Config(_))
    ));

    let ambiguous = FakeCatalog {
        user_playlists: Some(user_playlists(
            vec![
                user_playlist("radar-a", "Release Radar", "spotify"),
                user_playlist("radar-b", "Release Radar", "spotify"),
            ],
            2,
            50,
        )),
        ..Default::default()
    };
    let aggregator = PlaylistAggregator::new(&ambiguous);
    assert!(matches!(
        aggregator.find_source_playlist("user").await,
        Err(Error::Config(_))
    ));
}
