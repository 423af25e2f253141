use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, sync::Arc};

use crate::{
    api, config,
    types::{AuthCallback, ServeContext},
};

/// Starts the short-lived listener that receives the one-shot OAuth
/// redirect. Bound to the loopback interface; torn down by process exit.
pub async fn start_callback_server(state: Arc<AuthCallback>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(
            config::CALLBACK_ENDPOINT,
            get(api::callback).layer(Extension(state)),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], config::CALLBACK_PORT));
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Starts the long-running server mode: a login page on `/` and the OAuth
/// redirect target that runs the whole pipeline for the visiting user.
pub async fn start_radar_server(context: Arc<ServeContext>) {
    let app = Router::new()
        .route("/", get(api::index))
        .route(config::REDIRECT_ENDPOINT, get(api::redirect))
        .route("/health", get(api::health))
        .layer(Extension(context));

    let addr = SocketAddr::from(([0, 0, 0, 0], config::CALLBACK_PORT));
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
