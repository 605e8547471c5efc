//! Configuration options for character search.
//!
//! [`SearchOptions`] controls matching (diacritics, codepoint threshold), the
//! usage-tier thresholds and the display score of the null match. Every
//! field has a default, so a partial settings file deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::ranking::Ranking;

/// Global options that control matching and ranking.
///
/// # Defaults
///
/// - `keep_diacritics`: `false` (diacritics are stripped before comparison)
/// - `recent_rank`: `3` (the third most recent use is the recency cutoff)
/// - `codepoint_threshold`: [`Ranking::Contains`]
/// - `null_match_score`: `0.0`
///
/// # Examples
///
/// ```
/// use unicode_search::{Ranking, SearchOptions};
///
/// let opts = SearchOptions::default();
/// assert!(!opts.keep_diacritics);
/// assert_eq!(opts.recent_rank, 3);
///
/// let opts: SearchOptions = serde_json::from_str(r#"{"codepoint_threshold":"starts_with"}"#).unwrap();
/// assert_eq!(opts.codepoint_threshold, Ranking::StartsWith);
/// assert_eq!(opts.recent_rank, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// When `true`, diacritics are preserved during comparison. When `false`
    /// (default), they are stripped so that "creme" matches "cr\u{00E8}me".
    pub keep_diacritics: bool,

    /// 1-based rank of the most recent use that defines the recency cutoff.
    /// With fewer tracked uses than this, the cutoff is the epoch.
    pub recent_rank: usize,

    /// Minimum tier a match against the hexadecimal codepoint must reach.
    /// Weaker codepoint matches (acronym, fuzzy) are discarded, since
    /// scattered hex digits are almost never what the user meant.
    pub codepoint_threshold: Ranking,

    /// Score reported to the presentation layer for browse-mode matches.
    pub null_match_score: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keep_diacritics: false,
            recent_rank: 3,
            codepoint_threshold: Ranking::Contains,
            null_match_score: 0.0,
        }
    }
}
