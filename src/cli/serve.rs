use std::sync::Arc;

use crate::{config, error, info, server, types::ServeContext};

pub async fn serve() {
    let credentials = match config::load_credentials().await {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };
    let app_config = match config::load_config().await {
        Ok(app_config) => app_config,
        Err(e) => error!("{}", e),
    };
    let host = match app_config.require_host() {
        Ok(host) => host.to_string(),
        Err(e) => error!("{}", e),
    };

    let redirect_uri = config::serve_redirect_uri(&host);
    info!("Listening at {}:{}", host, config::CALLBACK_PORT);

    server::start_radar_server(Arc::new(ServeContext {
        credentials,
        redirect_uri,
    }))
    .await;
}
