use spymcli::matching::{MIN_SIMILARITY, duration_compatible, normalize, resolve, score};
use spymcli::types::{MatchCandidate, MatchResult, Track};

// Helper function to create a source track
fn create_track(artist: &str, title: &str, duration_secs: u32) -> Track {
    Track {
        id: "spotify_track_1".to_string(),
        artist: artist.to_string(),
        title: title.to_string(),
        duration_secs,
    }
}

// Helper function to create a search candidate
fn create_candidate(video_id: &str, artist: &str, title: &str, duration_secs: u32) -> MatchCandidate {
    MatchCandidate {
        video_id: video_id.to_string(),
        artist: artist.to_string(),
        title: title.to_string(),
        duration_secs,
    }
}

#[test]
fn test_normalize_case_and_punctuation() {
    assert_eq!(normalize("Don't Stop Me Now"), "don t stop me now");
    assert_eq!(normalize("  Hello,   World!  "), "hello world");
    assert_eq!(normalize("AC/DC"), "ac dc");
}

#[test]
fn test_normalize_strips_feat_suffixes() {
    assert_eq!(normalize("Airplanes (feat. Hayley Williams)"), "airplanes");
    assert_eq!(normalize("Airplanes feat. Hayley Williams"), "airplanes");
    assert_eq!(normalize("Airplanes ft. Hayley Williams"), "airplanes");
    assert_eq!(normalize("Airplanes featuring Hayley Williams"), "airplanes");

    // "ft" inside a word must not trigger the suffix pattern
    assert_eq!(normalize("Swift Horses"), "swift horses");
}

#[test]
fn test_normalize_folds_diacritics() {
    assert_eq!(normalize("Beyoncé"), "beyonce");
    assert_eq!(normalize("Sigur Rós"), "sigur ros");
    assert_eq!(normalize("Motörhead"), "motorhead");
}

#[test]
fn test_score_reflexivity() {
    // identical inputs always yield a perfect score
    let s = score("Queen", "Bohemian Rhapsody", "Queen", "Bohemian Rhapsody");
    assert_eq!(s, 1.0);

    // identical after normalization is just as perfect
    let s = score("Beyoncé", "Halo", "beyonce", "HALO");
    assert_eq!(s, 1.0);
}

#[test]
fn test_score_unrelated_tracks_fail_threshold() {
    let s = score("Nirvana", "Smells Like Teen Spirit", "Mozart", "Requiem");
    assert!(s < MIN_SIMILARITY, "score {} should be below threshold", s);
}

#[test]
fn test_score_is_deterministic() {
    let a = score("Daft Punk", "One More Time", "Daft Punk - Topic", "One More Time");
    let b = score("Daft Punk", "One More Time", "Daft Punk - Topic", "One More Time");
    assert_eq!(a, b);
}

#[test]
fn test_duration_unknown_source_accepts_everything() {
    assert!(duration_compatible(0, 0));
    assert!(duration_compatible(0, 1));
    assert!(duration_compatible(0, 999_999));
}

#[test]
fn test_duration_tolerance_boundary() {
    // 15% of 200s is exactly 30s
    assert!(duration_compatible(200, 230));
    assert!(!duration_compatible(200, 231));
    assert!(duration_compatible(200, 170));
    assert!(!duration_compatible(200, 169));
    assert!(duration_compatible(200, 200));
}

#[test]
fn test_resolve_empty_candidates() {
    let track = create_track("Queen", "Bohemian Rhapsody", 354);
    let result = resolve(&track, &[], MIN_SIMILARITY);

    assert_eq!(
        result,
        MatchResult::Unmatched {
            reason: "no search results".to_string()
        }
    );
}

#[test]
fn test_resolve_first_above_threshold_beats_higher_score() {
    let track = create_track("Queen", "Bohemian Rhapsody", 354);

    // candidate 1 clears the threshold, candidate 2 scores strictly higher
    let c1 = create_candidate("video_1", "Queen", "Bohemian Rhapsody Live Version", 354);
    let c2 = create_candidate("video_2", "Queen", "Bohemian Rhapsody", 354);

    let s1 = score(&track.artist, &track.title, &c1.artist, &c1.title);
    let s2 = score(&track.artist, &track.title, &c2.artist, &c2.title);
    assert!(s1 >= MIN_SIMILARITY);
    assert!(s2 > s1);

    // search rank wins over score magnitude
    match resolve(&track, &[c1, c2], MIN_SIMILARITY) {
        MatchResult::Matched { video_id, score } => {
            assert_eq!(video_id, "video_1");
            assert!(score >= MIN_SIMILARITY);
        }
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn test_resolve_skips_below_threshold_candidate() {
    let track = create_track("Queen", "Bohemian Rhapsody", 354);

    // candidate 1 fails the threshold and is skipped despite its rank
    let c1 = create_candidate("video_1", "Mozart", "Requiem", 354);
    let c2 = create_candidate("video_2", "Queen", "Bohemian Rhapsody", 354);

    match resolve(&track, &[c1, c2], MIN_SIMILARITY) {
        MatchResult::Matched { video_id, .. } => assert_eq!(video_id, "video_2"),
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn test_resolve_skips_duration_incompatible_candidate() {
    let track = create_track("Queen", "Bohemian Rhapsody", 354);

    // textual match but an extended cut way outside the tolerance
    let c1 = create_candidate("video_1", "Queen", "Bohemian Rhapsody", 500);
    let c2 = create_candidate("video_2", "Queen", "Bohemian Rhapsody", 350);

    match resolve(&track, &[c1, c2], MIN_SIMILARITY) {
        MatchResult::Matched { video_id, .. } => assert_eq!(video_id, "video_2"),
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn test_resolve_no_candidate_met_threshold() {
    let track = create_track("Queen", "Bohemian Rhapsody", 354);
    let c1 = create_candidate("video_1", "Mozart", "Requiem", 354);

    assert_eq!(
        resolve(&track, &[c1], MIN_SIMILARITY),
        MatchResult::Unmatched {
            reason: "no candidate met threshold".to_string()
        }
    );
}

#[test]
fn test_resolve_tolerates_empty_candidate_fields() {
    let track = create_track("Queen", "Bohemian Rhapsody", 354);
    let c1 = create_candidate("video_1", "", "", 0);

    // malformed candidates score low instead of failing
    assert_eq!(
        resolve(&track, &[c1], MIN_SIMILARITY),
        MatchResult::Unmatched {
            reason: "no candidate met threshold".to_string()
        }
    );
}

#[test]
fn test_resolve_unknown_source_duration_matches_any_length() {
    let track = create_track("Queen", "Bohemian Rhapsody", 0);
    let c1 = create_candidate("video_1", "Queen", "Bohemian Rhapsody", 9999);

    match resolve(&track, &[c1], MIN_SIMILARITY) {
        MatchResult::Matched { video_id, .. } => assert_eq!(video_id, "video_1"),
        other => panic!("expected a match, got {:?}", other),
    }
}
