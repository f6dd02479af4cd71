use std::{collections::BTreeMap, io::Error, path::PathBuf};

use chrono::Utc;

use crate::types::{MatchResult, PlaylistMigrationRecord, TrackMatch};

#[derive(Debug)]
pub enum LedgerError {
    IoError(Error),
    SerdeError(serde_json::Error),
    CriticalError(String),
}

impl From<Error> for LedgerError {
    fn from(err: Error) -> Self {
        LedgerError::IoError(err)
    }
}

/// What to do when a track that already has a `Matched` result resolves to a
/// different destination track on a later run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RematchPolicy {
    #[default]
    KeepExisting,
    ReplaceDifferent,
}

pub struct MigrationLedger {
    path: PathBuf,
    rematch: RematchPolicy,
    records: BTreeMap<String, PlaylistMigrationRecord>,
}

impl MigrationLedger {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            rematch: RematchPolicy::default(),
            records: BTreeMap::new(),
        }
    }

    pub fn with_rematch(mut self, rematch: RematchPolicy) -> Self {
        self.rematch = rematch;
        self
    }

    pub async fn load(path: PathBuf) -> Result<Self, LedgerError> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            // a missing document is the first-run case, not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new(path));
            }
            Err(e) => return Err(LedgerError::IoError(e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::new(path));
        }

        let records: BTreeMap<String, PlaylistMigrationRecord> =
            serde_json::from_str(&content).map_err(|e| LedgerError::SerdeError(e))?;
        Ok(Self {
            path,
            rematch: RematchPolicy::default(),
            records,
        })
    }

    pub fn record(&self, playlist_id: &str) -> Option<&PlaylistMigrationRecord> {
        self.records.get(playlist_id)
    }

    pub fn records(&self) -> &BTreeMap<String, PlaylistMigrationRecord> {
        &self.records
    }

    pub fn ensure_record(&mut self, playlist_id: &str, name: &str) -> &mut PlaylistMigrationRecord {
        self.records
            .entry(playlist_id.to_string())
            .or_insert_with(|| PlaylistMigrationRecord {
                name: name.to_string(),
                youtube_id: None,
                tracks: Vec::new(),
                last_migrated: 0,
            })
    }

    pub fn destination_of(&self, playlist_id: &str) -> Option<&str> {
        self.records
            .get(playlist_id)
            .and_then(|r| r.youtube_id.as_deref())
    }

    pub fn bind_destination(&mut self, playlist_id: &str, youtube_id: &str) -> Result<(), LedgerError> {
        let record = self.records.get_mut(playlist_id).ok_or_else(|| {
            LedgerError::CriticalError(format!("no record for playlist {}", playlist_id))
        })?;

        match &record.youtube_id {
            Some(existing) if existing != youtube_id => Err(LedgerError::CriticalError(format!(
                "playlist {} is already bound to {}, refusing to rebind to {}",
                playlist_id, existing, youtube_id
            ))),
            _ => {
                record.youtube_id = Some(youtube_id.to_string());
                Ok(())
            }
        }
    }

    pub fn is_matched(&self, playlist_id: &str, track_id: &str) -> bool {
        self.records
            .get(playlist_id)
            .and_then(|r| r.tracks.iter().find(|t| t.spotify_id == track_id))
            .map_or(false, |t| t.result.is_matched())
    }

    pub fn upsert_match(&mut self, playlist_id: &str, track_id: &str, result: MatchResult) {
        let Some(record) = self.records.get_mut(playlist_id) else {
            return;
        };

        match record.tracks.iter_mut().find(|t| t.spotify_id == track_id) {
            Some(existing) => {
                let replace = match (&existing.result, &result) {
                    // a track once matched stays matched across runs even if
                    // a later search fails transiently
                    (MatchResult::Matched { .. }, MatchResult::Unmatched { .. }) => false,
                    (
                        MatchResult::Matched { video_id: current, .. },
                        MatchResult::Matched { video_id: fresh, .. },
                    ) => current == fresh || self.rematch == RematchPolicy::ReplaceDifferent,
                    _ => true,
                };
                if replace {
                    existing.result = result;
                }
            }
            None => record.tracks.push(TrackMatch {
                spotify_id: track_id.to_string(),
                result,
            }),
        }
    }

    pub fn mark_migrated(&mut self, playlist_id: &str) {
        if let Some(record) = self.records.get_mut(playlist_id) {
            record.last_migrated = Utc::now().timestamp() as u64;
        }
    }

    pub async fn persist(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| LedgerError::IoError(e))?;
        }

        let json =
            serde_json::to_string_pretty(&self.records).map_err(|e| LedgerError::SerdeError(e))?;

        // write to a sidecar and rename so a reader or a crashed run never
        // observes a partially written document
        let tmp = self.path.with_extension("json.tmp");
        async_fs::write(&tmp, json)
            .await
            .map_err(|e| LedgerError::IoError(e))?;
        async_fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| LedgerError::IoError(e))
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spymcli/ledger.json");
        path
    }
}
