//! Track matching between Spotify metadata and YouTube Music search results.
//!
//! Everything in this module is pure: the functions take strings and numbers
//! and return scores or a [`MatchResult`]. Network access, rate limiting and
//! persistence live elsewhere so that matching stays independently testable.

use once_cell::sync::Lazy;
use regex::Regex;
use strsim::jaro_winkler;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::types::{MatchCandidate, MatchResult, Track};

/// Minimum combined similarity a candidate must reach to be accepted.
pub const MIN_SIMILARITY: f64 = 0.6;

/// Maximum relative duration deviation between source and candidate.
pub const DURATION_TOLERANCE: f64 = 0.15;

/// Featured-artist credits in brackets: "(feat. X)", "[ft. X]".
static FEAT_BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[\(\[](?:feat\.?|ft\.?|featuring)\s+[^)\]]*[\)\]]").unwrap()
});

/// Bare featured-artist suffixes: "Song feat. X". Services disagree on
/// whether these belong to the title or the artist field, so both forms are
/// stripped before comparison.
static FEAT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(?:feat\.?|ft\.?|featuring)\s+.+$").unwrap());

/// Normalizes a metadata string for comparison: strips feat-suffixes,
/// decomposes and drops diacritics, lowercases, replaces punctuation with
/// spaces and collapses whitespace.
pub fn normalize(s: &str) -> String {
    let stripped = FEAT_BRACKETED.replace_all(s, "");
    let stripped = FEAT_SUFFIX.replace(&stripped, "");
    let folded: String = stripped.nfkd().filter(|c| !is_combining_mark(*c)).collect();

    let mut cleaned = String::with_capacity(folded.len());
    for c in folded.to_lowercase().chars() {
        if c.is_alphanumeric() {
            cleaned.push(c);
        } else {
            cleaned.push(' ');
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Combined textual similarity between a source track and a candidate,
/// in `[0, 1]`. Artist and title are compared separately with Jaro-Winkler
/// over normalized strings and weighted equally.
pub fn score(
    source_artist: &str,
    source_title: &str,
    candidate_artist: &str,
    candidate_title: &str,
) -> f64 {
    let artist_sim = jaro_winkler(&normalize(source_artist), &normalize(candidate_artist));
    let title_sim = jaro_winkler(&normalize(source_title), &normalize(candidate_title));
    title_sim * 0.5 + artist_sim * 0.5
}

/// Whether a candidate duration is acceptable for a source duration.
/// A source duration of zero means "unknown" and accepts anything.
pub fn duration_compatible(source_secs: u32, candidate_secs: u32) -> bool {
    if source_secs == 0 {
        return true;
    }
    let delta = (source_secs as i64 - candidate_secs as i64).abs() as f64;
    delta / source_secs as f64 <= DURATION_TOLERANCE
}

/// Picks at most one destination track for `track` from `candidates`.
///
/// Candidates are visited in the order the search API returned them; the
/// first one that clears `min_similarity` and the duration check wins. The
/// provider ranking already encodes relevance signals the scorer cannot see
/// (popularity, clean/explicit preference), so a later candidate is never
/// preferred for score alone.
pub fn resolve(track: &Track, candidates: &[MatchCandidate], min_similarity: f64) -> MatchResult {
    if candidates.is_empty() {
        return MatchResult::Unmatched {
            reason: "no search results".to_string(),
        };
    }

    for candidate in candidates {
        let similarity = score(&track.artist, &track.title, &candidate.artist, &candidate.title);
        if similarity < min_similarity {
            continue;
        }
        if !duration_compatible(track.duration_secs, candidate.duration_secs) {
            continue;
        }
        return MatchResult::Matched {
            video_id: candidate.video_id.clone(),
            score: similarity,
        };
    }

    MatchResult::Unmatched {
        reason: "no candidate met threshold".to_string(),
    }
}
