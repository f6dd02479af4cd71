use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::{
    config, error, info,
    management::{MigrationLedger, RematchPolicy, TokenManager},
    migrate::{MigrateError, SourceCatalog, migrate_playlist},
    spotify::SpotifyCatalog,
    success,
    types::{Service, SourcePlaylist},
    warning,
    youtube::YoutubeCatalog,
};

pub async fn migrate(playlist_id: Option<String>, all: bool, no_update: bool, allow_rematch: bool) {
    let spotify_mgr = match TokenManager::load(Service::Spotify).await {
        Ok(mgr) => mgr,
        Err(e) => error!(
            "Failed to load Spotify token. Please run spymcli auth\n Error: {}",
            e
        ),
    };
    let youtube_mgr = match TokenManager::load(Service::Youtube).await {
        Ok(mgr) => mgr,
        Err(e) => error!(
            "Failed to load YouTube token. Please run spymcli auth\n Error: {}",
            e
        ),
    };

    let mut source = SpotifyCatalog::new(spotify_mgr);
    let mut dest = YoutubeCatalog::new(youtube_mgr);

    // an unreadable ledger is fatal: continuing without reliable state risks
    // duplicate playlists and lost progress
    let mut ledger = match MigrationLedger::load(MigrationLedger::default_path()).await {
        Ok(ledger) => ledger,
        Err(e) => error!("Failed to load migration ledger: {:?}", e),
    };

    if allow_rematch {
        ledger = ledger.with_rematch(RematchPolicy::ReplaceDifferent);
    }

    let update_existing = !no_update;

    let targets: Vec<SourcePlaylist> = if all {
        match source.list_playlists().await {
            Ok(playlists) => playlists,
            Err(e) => error!("Failed to load playlists: {}", e),
        }
    } else {
        match playlist_id {
            Some(id) => vec![SourcePlaylist {
                id,
                name: String::new(),
            }],
            None => error!("No playlist given. Use --playlist-id or --all."),
        }
    };

    let total = targets.len();
    let mut fatal = 0;

    for (i, playlist) in targets.iter().enumerate() {
        if all {
            info!("Processing playlist {}/{}: {}", i + 1, total, playlist.name);
        }

        let pb = ProgressBar::new_spinner();
        pb.set_message("Migrating tracks...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        let outcome = migrate_playlist(
            &mut source,
            &mut dest,
            &mut ledger,
            &playlist.id,
            update_existing,
        )
        .await;
        pb.finish_and_clear();

        match outcome {
            Ok(summary) => {
                if !update_existing
                    && summary.matched == 0
                    && summary.unmatched == 0
                    && summary.skipped > 0
                {
                    info!("Playlist already migrated, skipping {} tracks.", summary.skipped);
                } else {
                    success!(
                        "Matched {}, unmatched {}, skipped {}.",
                        summary.matched,
                        summary.unmatched,
                        summary.skipped
                    );
                }
            }
            Err(MigrateError::Ledger(e)) => {
                error!("Ledger failure: {:?}", e);
            }
            Err(e) => {
                warning!("Migration failed: {:?}", e);
                fatal += 1;
            }
        }

        // pause between playlists in batch mode
        if all && i + 1 < total {
            sleep(Duration::from_millis(config::request_delay_ms())).await;
        }
    }

    if fatal > 0 {
        error!("{} playlist migration(s) failed.", fatal);
    }
}
