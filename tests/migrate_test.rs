use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use tempfile::TempDir;

use spymcli::management::MigrationLedger;
use spymcli::migrate::{DestinationCatalog, MigrateError, SourceCatalog, migrate_playlist};
use spymcli::types::{MatchCandidate, MatchResult, PlaylistDetail, SourcePlaylist, Track};

fn ledger_path(dir: &TempDir) -> PathBuf {
    dir.path().join("ledger.json")
}

fn track(id: &str, artist: &str, title: &str, duration_secs: u32) -> Track {
    Track {
        id: id.to_string(),
        artist: artist.to_string(),
        title: title.to_string(),
        duration_secs,
    }
}

fn exact_candidate(video_id: &str, track: &Track) -> MatchCandidate {
    MatchCandidate {
        video_id: video_id.to_string(),
        artist: track.artist.clone(),
        title: track.title.clone(),
        duration_secs: track.duration_secs,
    }
}

struct FakeSource {
    name: String,
    tracks: Vec<Track>,
    playlist_calls: usize,
}

impl FakeSource {
    fn new(name: &str, tracks: Vec<Track>) -> Self {
        Self {
            name: name.to_string(),
            tracks,
            playlist_calls: 0,
        }
    }
}

impl SourceCatalog for FakeSource {
    async fn list_playlists(&mut self) -> spymcli::Res<Vec<SourcePlaylist>> {
        Ok(vec![SourcePlaylist {
            id: "sp_pl_1".to_string(),
            name: self.name.clone(),
        }])
    }

    async fn playlist(&mut self, _playlist_id: &str) -> spymcli::Res<PlaylistDetail> {
        self.playlist_calls += 1;
        Ok(PlaylistDetail {
            name: self.name.clone(),
            tracks: self.tracks.clone(),
        })
    }
}

#[derive(Default)]
struct FakeDest {
    candidates: HashMap<String, Vec<MatchCandidate>>,
    fail_titles: HashSet<String>,
    fail_create: bool,
    existing_items: Vec<String>,
    search_calls: usize,
    create_calls: usize,
    items_calls: usize,
    added: Vec<String>,
}

impl DestinationCatalog for FakeDest {
    async fn search_tracks(
        &mut self,
        _artist: &str,
        title: &str,
    ) -> spymcli::Res<Vec<MatchCandidate>> {
        self.search_calls += 1;
        if self.fail_titles.contains(title) {
            return Err("search backend unavailable".into());
        }
        Ok(self.candidates.get(title).cloned().unwrap_or_default())
    }

    async fn create_playlist(&mut self, _name: &str) -> spymcli::Res<String> {
        self.create_calls += 1;
        if self.fail_create {
            return Err("quota exceeded".into());
        }
        Ok("yt_pl_1".to_string())
    }

    async fn playlist_items(&mut self, _playlist_id: &str) -> spymcli::Res<Vec<String>> {
        self.items_calls += 1;
        Ok(self.existing_items.clone())
    }

    async fn add_track(&mut self, _playlist_id: &str, video_id: &str) -> spymcli::Res<()> {
        self.added.push(video_id.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_fresh_migration_matches_and_adds() {
    let dir = TempDir::new().unwrap();
    let mut ledger = MigrationLedger::new(ledger_path(&dir));

    let t1 = track("track_a", "Queen", "Bohemian Rhapsody", 354);
    let t2 = track("track_b", "Daft Punk", "One More Time", 320);
    let t3 = track("track_c", "The Midnight", "Sunset", 290);

    let mut dest = FakeDest::default();
    dest.candidates
        .insert(t1.title.clone(), vec![exact_candidate("video_a", &t1)]);
    dest.candidates
        .insert(t2.title.clone(), vec![exact_candidate("video_b", &t2)]);
    // t3 only gets an unrelated candidate
    dest.candidates.insert(
        t3.title.clone(),
        vec![MatchCandidate {
            video_id: "video_x".to_string(),
            artist: "Mozart".to_string(),
            title: "Requiem".to_string(),
            duration_secs: 290,
        }],
    );

    let mut source = FakeSource::new("Road Trip", vec![t1, t2, t3]);

    let summary = migrate_playlist(&mut source, &mut dest, &mut ledger, "sp_pl_1", true)
        .await
        .unwrap();

    assert_eq!(summary.matched, 2);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(summary.skipped, 0);

    assert_eq!(dest.create_calls, 1);
    assert_eq!(dest.added, vec!["video_a", "video_b"]);
    assert_eq!(ledger.destination_of("sp_pl_1"), Some("yt_pl_1"));

    // the document on disk reflects the run
    let reloaded = MigrationLedger::load(ledger_path(&dir)).await.unwrap();
    let record = reloaded.record("sp_pl_1").unwrap();
    assert_eq!(record.tracks.len(), 3);
    assert!(record.last_migrated > 0);
}

#[tokio::test]
async fn test_resumed_run_issues_no_search_calls() {
    let dir = TempDir::new().unwrap();
    let mut ledger = MigrationLedger::new(ledger_path(&dir));

    let t1 = track("track_a", "Queen", "Bohemian Rhapsody", 354);
    let t2 = track("track_b", "Daft Punk", "One More Time", 320);

    // both tracks already matched on a previous run
    ledger.ensure_record("sp_pl_1", "Road Trip");
    ledger.bind_destination("sp_pl_1", "yt_pl_1").unwrap();
    ledger.upsert_match(
        "sp_pl_1",
        "track_a",
        MatchResult::Matched {
            video_id: "video_a".to_string(),
            score: 1.0,
        },
    );
    ledger.upsert_match(
        "sp_pl_1",
        "track_b",
        MatchResult::Matched {
            video_id: "video_b".to_string(),
            score: 1.0,
        },
    );

    let mut dest = FakeDest {
        existing_items: vec!["video_a".to_string(), "video_b".to_string()],
        ..FakeDest::default()
    };
    let mut source = FakeSource::new("Road Trip", vec![t1, t2]);

    let summary = migrate_playlist(&mut source, &mut dest, &mut ledger, "sp_pl_1", true)
        .await
        .unwrap();

    assert_eq!(summary.matched, 0);
    assert_eq!(summary.unmatched, 0);
    assert_eq!(summary.skipped, 2);

    // resolution was skipped entirely, nothing was added twice
    assert_eq!(dest.search_calls, 0);
    assert_eq!(dest.create_calls, 0);
    assert!(dest.added.is_empty());
}

#[tokio::test]
async fn test_no_update_skips_without_any_network_calls() {
    let dir = TempDir::new().unwrap();
    let mut ledger = MigrationLedger::new(ledger_path(&dir));

    ledger.ensure_record("sp_pl_1", "Road Trip");
    ledger.bind_destination("sp_pl_1", "yt_pl_1").unwrap();
    ledger.upsert_match(
        "sp_pl_1",
        "track_a",
        MatchResult::Matched {
            video_id: "video_a".to_string(),
            score: 1.0,
        },
    );

    let mut dest = FakeDest::default();
    let mut source = FakeSource::new(
        "Road Trip",
        vec![track("track_a", "Queen", "Bohemian Rhapsody", 354)],
    );

    let summary = migrate_playlist(&mut source, &mut dest, &mut ledger, "sp_pl_1", false)
        .await
        .unwrap();

    assert_eq!(summary.matched, 0);
    assert_eq!(summary.unmatched, 0);
    assert_eq!(summary.skipped, 1);

    assert_eq!(source.playlist_calls, 0);
    assert_eq!(dest.search_calls, 0);
    assert_eq!(dest.create_calls, 0);
    assert_eq!(dest.items_calls, 0);
}

#[tokio::test]
async fn test_search_failure_is_recorded_and_run_continues() {
    let dir = TempDir::new().unwrap();
    let mut ledger = MigrationLedger::new(ledger_path(&dir));

    let t1 = track("track_a", "Queen", "Bohemian Rhapsody", 354);
    let t2 = track("track_b", "Daft Punk", "One More Time", 320);

    let mut dest = FakeDest::default();
    dest.fail_titles.insert(t1.title.clone());
    dest.candidates
        .insert(t2.title.clone(), vec![exact_candidate("video_b", &t2)]);

    let mut source = FakeSource::new("Road Trip", vec![t1, t2]);

    let summary = migrate_playlist(&mut source, &mut dest, &mut ledger, "sp_pl_1", true)
        .await
        .unwrap();

    // the failing track did not block the second one
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(dest.added, vec!["video_b"]);

    let record = ledger.record("sp_pl_1").unwrap();
    match &record.tracks[0].result {
        MatchResult::Unmatched { reason } => assert!(reason.contains("unavailable")),
        other => panic!("expected unmatched with error reason, got {:?}", other),
    }
}

#[tokio::test]
async fn test_playlist_creation_failure_is_fatal_for_playlist() {
    let dir = TempDir::new().unwrap();
    let mut ledger = MigrationLedger::new(ledger_path(&dir));

    let mut dest = FakeDest {
        fail_create: true,
        ..FakeDest::default()
    };
    let mut source = FakeSource::new(
        "Road Trip",
        vec![track("track_a", "Queen", "Bohemian Rhapsody", 354)],
    );

    let err = migrate_playlist(&mut source, &mut dest, &mut ledger, "sp_pl_1", true)
        .await
        .unwrap_err();

    match err {
        MigrateError::PlaylistCreation(_) => {}
        other => panic!("expected playlist creation error, got {:?}", other),
    }

    // no track resolution happened and no binding was persisted
    assert_eq!(dest.search_calls, 0);
    assert_eq!(ledger.destination_of("sp_pl_1"), None);
    assert!(!ledger_path(&dir).exists());
}

#[tokio::test]
async fn test_adds_are_idempotent_against_existing_items() {
    let dir = TempDir::new().unwrap();
    let mut ledger = MigrationLedger::new(ledger_path(&dir));

    let t1 = track("track_a", "Queen", "Bohemian Rhapsody", 354);
    let t2 = track("track_b", "Daft Punk", "One More Time", 320);

    // track_a was matched and added on a previous run
    ledger.ensure_record("sp_pl_1", "Road Trip");
    ledger.bind_destination("sp_pl_1", "yt_pl_1").unwrap();
    ledger.upsert_match(
        "sp_pl_1",
        "track_a",
        MatchResult::Matched {
            video_id: "video_a".to_string(),
            score: 1.0,
        },
    );

    let mut dest = FakeDest {
        existing_items: vec!["video_a".to_string()],
        ..FakeDest::default()
    };
    dest.candidates
        .insert(t2.title.clone(), vec![exact_candidate("video_b", &t2)]);

    let mut source = FakeSource::new("Road Trip", vec![t1, t2]);

    let summary = migrate_playlist(&mut source, &mut dest, &mut ledger, "sp_pl_1", true)
        .await
        .unwrap();

    assert_eq!(summary.matched, 1);
    assert_eq!(summary.skipped, 1);

    // only the track resolved in this run was searched and added
    assert_eq!(dest.search_calls, 1);
    assert_eq!(dest.added, vec!["video_b"]);
}
