use crate::{
    management::TokenManager,
    migrate::SourceCatalog,
    types::{PlaylistDetail, SourcePlaylist},
};

use super::playlists;

/// Source catalog backed by the Spotify Web API.
pub struct SpotifyCatalog {
    token_mgr: TokenManager,
}

impl SpotifyCatalog {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self { token_mgr }
    }
}

impl SourceCatalog for SpotifyCatalog {
    async fn list_playlists(&mut self) -> crate::Res<Vec<SourcePlaylist>> {
        let token = self.token_mgr.get_valid_token().await;
        Ok(playlists::get_user_playlists(&token).await?)
    }

    async fn playlist(&mut self, playlist_id: &str) -> crate::Res<PlaylistDetail> {
        let token = self.token_mgr.get_valid_token().await;
        Ok(playlists::get_playlist(playlist_id, &token).await?)
    }
}
