use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::{self, Credentials},
    error, info,
    management::{PlaylistAggregator, TokenManager},
    spotify::{self, SpotifyClient},
    success,
    types::ResolvedAlbumRow,
    warning,
};

pub async fn run() {
    let credentials = match config::load_credentials().await {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };
    let app_config = match config::load_config().await {
        Ok(app_config) => app_config,
        Err(e) => error!("{}", e),
    };
    let user_id = match app_config.require_user_id() {
        Ok(user_id) => user_id.to_string(),
        Err(e) => error!("{}", e),
    };

    let access_token = obtain_token(&credentials).await;
    let client = SpotifyClient::new(access_token);
    let aggregator = PlaylistAggregator::new(&client);

    let source_playlist_id = match &app_config.source_playlist_id {
        Some(id) => id.clone(),
        None => match aggregator.find_source_playlist(&user_id).await {
            Ok(id) => id,
            Err(e) => error!("{}", e),
        },
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Resolving preferred album editions...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let albums = match aggregator.resolve_source_albums(&source_playlist_id).await {
        Ok(albums) => {
            pb.finish_and_clear();
            albums
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to resolve albums: {}", e);
        }
    };

    if albums.is_empty() {
        warning!("No albums referenced by the source playlist, nothing to publish");
        return;
    }

    let rows: Vec<ResolvedAlbumRow> = albums
        .iter()
        .map(|album| ResolvedAlbumRow {
            album: album.name.clone(),
            artist: album
                .artists
                .first()
                .map(|artist| artist.name.clone())
                .unwrap_or_default(),
            tracks: album.tracks.total,
        })
        .collect();
    println!("{}", Table::new(rows));

    let track_uris = match aggregator.flatten_track_uris(&albums).await {
        Ok(track_uris) => track_uris,
        Err(e) => error!("Failed to collect album tracks: {}", e),
    };
    info!(
        "Aggregated {} tracks from {} albums",
        track_uris.len(),
        albums.len()
    );

    match aggregator.publish(track_uris, &user_id).await {
        Ok(created) => success!("Created playlist \"{}\"", created.name),
        Err(e) => error!("Failed to publish playlist: {}", e),
    }
}

/// Returns a usable access token, running the browser flow when no cached
/// token exists.
async fn obtain_token(credentials: &Credentials) -> String {
    match TokenManager::load().await {
        Ok(mut token_manager) => token_manager.get_valid_token(credentials).await,
        Err(_) => {
            info!("No cached token found, starting authorization...");
            let token = match spotify::auth::authorize(credentials).await {
                Ok(token) => token,
                Err(e) => error!("{}", e),
            };

            let token_manager = TokenManager::new(token.clone());
            if let Err(e) = token_manager.persist().await {
                warning!("Failed to cache token: {}", e);
            }
            token.access_token
        }
    }
}
