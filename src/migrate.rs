//! # Migration Orchestrator
//!
//! Drives the migration of one playlist from the source catalog to the
//! destination catalog: fetch the source tracks, search the destination per
//! track, resolve a match, record the outcome in the ledger and reconcile
//! the destination playlist contents.
//!
//! The orchestrator is written against the [`SourceCatalog`] and
//! [`DestinationCatalog`] traits rather than the concrete Spotify/YouTube
//! clients, so its state machine can be exercised in tests with in-memory
//! catalogs and without any network access. The production implementations
//! live in [`crate::spotify`] and [`crate::youtube`].
//!
//! ## Failure semantics
//!
//! - A single track's search failure is recorded as `Unmatched` with the
//!   error text and the run continues; one bad track never blocks the rest.
//! - A destination playlist creation or reconciliation failure aborts that
//!   playlist only; batch mode moves on to the next one.
//! - A ledger persistence failure aborts the migration, since continuing
//!   without reliable state risks duplicate playlists or lost progress.
//!
//! ## Resumability
//!
//! The ledger is persisted after every track resolution, so an interrupted
//! run leaves a consistent prefix of results behind. A subsequent run skips
//! every track that is already `Matched` and re-attempts only the rest.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::{Instant, sleep};

use crate::{
    management::{LedgerError, MigrationLedger},
    matching,
    types::{MatchCandidate, MatchResult, MigrationSummary, PlaylistDetail, SourcePlaylist},
    warning,
};

/// Read access to the service playlists are migrated from.
#[allow(async_fn_in_trait)]
pub trait SourceCatalog {
    async fn list_playlists(&mut self) -> crate::Res<Vec<SourcePlaylist>>;
    async fn playlist(&mut self, playlist_id: &str) -> crate::Res<PlaylistDetail>;
}

/// Search and mutation access to the service playlists are migrated to.
#[allow(async_fn_in_trait)]
pub trait DestinationCatalog {
    async fn search_tracks(&mut self, artist: &str, title: &str)
    -> crate::Res<Vec<MatchCandidate>>;
    async fn create_playlist(&mut self, name: &str) -> crate::Res<String>;
    async fn playlist_items(&mut self, playlist_id: &str) -> crate::Res<Vec<String>>;
    async fn add_track(&mut self, playlist_id: &str, video_id: &str) -> crate::Res<()>;
}

#[derive(Debug)]
pub enum MigrateError {
    SourceRead(String),
    PlaylistCreation(String),
    DestinationUpdate(String),
    Ledger(LedgerError),
}

impl From<LedgerError> for MigrateError {
    fn from(err: LedgerError) -> Self {
        MigrateError::Ledger(err)
    }
}

/// Enforces a minimum interval between calls to a quota-constrained API.
///
/// The destination catalog implementations call [`Pacer::wait`] before every
/// request; the first call passes through immediately.
pub struct Pacer {
    delay: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                sleep(self.delay - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Migrates a single playlist and returns the per-track summary counts.
///
/// With `update_existing` set to false a playlist that already has a ledger
/// record is skipped before any network call is made. Otherwise only tracks
/// without a `Matched` result are resolved, and the destination playlist is
/// reconciled so that every matched track is present exactly once.
pub async fn migrate_playlist<S, D>(
    source: &mut S,
    dest: &mut D,
    ledger: &mut MigrationLedger,
    playlist_id: &str,
    update_existing: bool,
) -> Result<MigrationSummary, MigrateError>
where
    S: SourceCatalog,
    D: DestinationCatalog,
{
    let mut summary = MigrationSummary::default();

    // no-update mode terminates before any network call
    if let Some(record) = ledger.record(playlist_id) {
        if !update_existing {
            summary.skipped = record.tracks.len();
            return Ok(summary);
        }
    }

    let detail = source
        .playlist(playlist_id)
        .await
        .map_err(|e| MigrateError::SourceRead(e.to_string()))?;

    ledger.ensure_record(playlist_id, &detail.name);

    let youtube_id = match ledger.destination_of(playlist_id) {
        Some(id) => id.to_string(),
        None => {
            let created = dest
                .create_playlist(&detail.name)
                .await
                .map_err(|e| MigrateError::PlaylistCreation(e.to_string()))?;
            ledger.bind_destination(playlist_id, &created)?;
            ledger.persist().await?;
            created
        }
    };

    for track in &detail.tracks {
        if ledger.is_matched(playlist_id, &track.id) {
            summary.skipped += 1;
            continue;
        }

        let result = match dest.search_tracks(&track.artist, &track.title).await {
            Ok(candidates) => matching::resolve(track, &candidates, matching::MIN_SIMILARITY),
            // one failing track must not block the remaining ones
            Err(e) => MatchResult::Unmatched {
                reason: e.to_string(),
            },
        };

        match &result {
            MatchResult::Matched { .. } => summary.matched += 1,
            MatchResult::Unmatched { .. } => summary.unmatched += 1,
        }

        ledger.upsert_match(playlist_id, &track.id, result);
        ledger.persist().await?;
    }

    let matched_ids: Vec<String> = ledger
        .record(playlist_id)
        .map(|record| {
            record
                .tracks
                .iter()
                .filter_map(|t| match &t.result {
                    MatchResult::Matched { video_id, .. } => Some(video_id.clone()),
                    MatchResult::Unmatched { .. } => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if !matched_ids.is_empty() {
        let present: HashSet<String> = dest
            .playlist_items(&youtube_id)
            .await
            .map_err(|e| MigrateError::DestinationUpdate(e.to_string()))?
            .into_iter()
            .collect();

        for video_id in matched_ids {
            if present.contains(&video_id) {
                continue;
            }
            if let Err(e) = dest.add_track(&youtube_id, &video_id).await {
                warning!("Failed to add video {} to playlist: {}", video_id, e);
            }
        }
    }

    ledger.mark_migrated(playlist_id);
    ledger.persist().await?;

    Ok(summary)
}
