use std::path::PathBuf;

use chrono::Utc;

use crate::{Res, config::Credentials, error::Error, spotify, types::Token, warning};

/// Caches the OAuth token on disk and refreshes it shortly before expiry.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Res<Self> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| Error::Auth(format!("no cached token at {}: {}", path.display(), e)))?;
        let token: Token = serde_json::from_str(&content)
            .map_err(|e| Error::Auth(format!("cannot parse cached token: {}", e)))?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Res<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Auth(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(&self.token).map_err(|e| Error::Auth(e.to_string()))?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| Error::Auth(e.to_string()))
    }

    /// Returns an access token, refreshing the cached one when it is about
    /// to expire. A failed refresh keeps the current token and is reported
    /// as a warning.
    pub async fn get_valid_token(&mut self, credentials: &Credentials) -> String {
        if self.is_expired() {
            match spotify::auth::refresh_token(credentials, &self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    let _ = self.persist().await;
                }
                Err(e) => warning!("Token refresh failed, keeping current token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - 240
    }

    fn token_path() -> PathBuf {
        let mut path = crate::config::data_dir();
        path.push("cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
