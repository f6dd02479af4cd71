use tabled::Table;

use crate::{
    error,
    management::TokenManager,
    migrate::SourceCatalog,
    spotify::SpotifyCatalog,
    types::{PlaylistTableRow, Service},
    warning,
};

pub async fn playlists() {
    let token_mgr = match TokenManager::load(Service::Spotify).await {
        Ok(mgr) => mgr,
        Err(e) => error!(
            "Failed to load Spotify token. Please run spymcli auth\n Error: {}",
            e
        ),
    };

    let mut source = SpotifyCatalog::new(token_mgr);

    match source.list_playlists().await {
        Ok(playlists) => {
            let mut rows: Vec<PlaylistTableRow> = playlists
                .into_iter()
                .map(|p| PlaylistTableRow {
                    id: p.id,
                    name: p.name,
                })
                .collect();
            rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            let table = Table::new(rows);
            println!("{}", table);
        }
        Err(e) => warning!("Failed to load playlists. Err: {}", e),
    }
}
