use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{
    Res,
    error::Error,
    info,
    management::PlaylistAggregator,
    spotify::{self, SpotifyClient},
    success,
    types::ServeContext,
    utils, warning,
};

const PAGE_STYLE: &str = "width: 100vw; height: 100vh; padding: 0; margin: 0; \
     background: black; font-family: monospace; display: flex; \
     align-items: center; justify-content: center; color: #20c20e;";

pub async fn index(Extension(context): Extension<Arc<ServeContext>>) -> Html<String> {
    let auth_url = spotify::auth::authorize_url(
        &context.credentials,
        &context.redirect_uri,
        &utils::generate_state(),
    );
    Html(format!(
        "<body style=\"{PAGE_STYLE}\"><a href=\"{auth_url}\" style=\"color: #20c20e;\">click me</a></body>"
    ))
}

pub async fn redirect(
    Query(params): Query<HashMap<String, String>>,
    Extension(context): Extension<Arc<ServeContext>>,
) -> Html<String> {
    match run_radar(&context, params.get("code")).await {
        Ok(display_name) => {
            let first_name = display_name
                .split(' ')
                .next()
                .filter(|name| !name.is_empty())
                .unwrap_or("Mysterious Person")
                .to_string();
            Html(format!(
                "<body style=\"{PAGE_STYLE}\"><div>enjoy, {first_name} :)</div></body>"
            ))
        }
        Err(e) => {
            warning!("Radar run failed: {}", e);
            Html(format!(
                "<body style=\"{PAGE_STYLE}\"><div>something went wrong, check the logs</div></body>"
            ))
        }
    }
}

/// Runs the whole pipeline for the user who completed the browser login.
async fn run_radar(context: &ServeContext, code: Option<&String>) -> Res<String> {
    let code = code.ok_or_else(|| Error::Auth("missing authorization code".to_string()))?;
    let token =
        spotify::auth::exchange_code(&context.credentials, code, &context.redirect_uri).await?;

    let client = SpotifyClient::new(token.access_token);
    let user = client.current_user().await?;
    info!("Building release radar playlist for {}", user.id);

    let aggregator = PlaylistAggregator::new(&client);
    let source_playlist_id = aggregator.find_source_playlist(&user.id).await?;
    let track_uris = aggregator
        .build_release_radar_track_list(&source_playlist_id)
        .await?;
    let created = aggregator.publish(track_uris, &user.id).await?;
    success!("Created playlist \"{}\"", created.name);

    Ok(user.display_name.unwrap_or_default())
}
