use crate::{config, error, management::TokenManager, spotify, success};

pub async fn auth() {
    let credentials = match config::load_credentials().await {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };

    let token = match spotify::auth::authorize(&credentials).await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    let token_manager = TokenManager::new(token);
    if let Err(e) = token_manager.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}
