use std::time::Duration;

use crate::{
    config,
    management::TokenManager,
    migrate::{DestinationCatalog, Pacer},
    types::MatchCandidate,
};

use super::{playlist, search};

/// Destination catalog backed by the YouTube Data API.
///
/// Every call waits on the shared [`Pacer`] first, so searches and playlist
/// mutations never exceed the configured request rate.
pub struct YoutubeCatalog {
    token_mgr: TokenManager,
    pacer: Pacer,
}

impl YoutubeCatalog {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self {
            token_mgr,
            pacer: Pacer::new(Duration::from_millis(config::request_delay_ms())),
        }
    }
}

impl DestinationCatalog for YoutubeCatalog {
    async fn search_tracks(
        &mut self,
        artist: &str,
        title: &str,
    ) -> crate::Res<Vec<MatchCandidate>> {
        self.pacer.wait().await;
        let token = self.token_mgr.get_valid_token().await;
        Ok(search::search_tracks(artist, title, &token).await?)
    }

    async fn create_playlist(&mut self, name: &str) -> crate::Res<String> {
        self.pacer.wait().await;
        let token = self.token_mgr.get_valid_token().await;
        Ok(playlist::create(name, &token).await?)
    }

    async fn playlist_items(&mut self, playlist_id: &str) -> crate::Res<Vec<String>> {
        self.pacer.wait().await;
        let token = self.token_mgr.get_valid_token().await;
        Ok(playlist::items(playlist_id, &token).await?)
    }

    async fn add_track(&mut self, playlist_id: &str, video_id: &str) -> crate::Res<()> {
        self.pacer.wait().await;
        let token = self.token_mgr.get_valid_token().await;
        Ok(playlist::add_track(playlist_id, video_id, &token).await?)
    }
}
