use std::path::PathBuf;

use chrono::Utc;

use crate::{
    spotify,
    types::{Service, Token},
    youtube,
};

pub struct TokenManager {
    service: Service,
    token: Token,
}

impl TokenManager {
    pub fn new(service: Service, token: Token) -> Self {
        TokenManager { service, token }
    }

    pub async fn load(service: Service) -> Result<Self, String> {
        let path = Self::token_path(service);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { service, token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path(self.service);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            let refreshed = match self.service {
                Service::Spotify => spotify::auth::refresh_token(&self.token.refresh_token).await,
                Service::Youtube => youtube::auth::refresh_token(&self.token.refresh_token).await,
            };

            if let Ok(new_token) = refreshed {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - 240
    }

    fn token_path(service: Service) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!("spymcli/cache/token-{}.json", service.slug()));
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
