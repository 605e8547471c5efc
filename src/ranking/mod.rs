//! Ranking tiers and matched spans for a single text field.
//!
//! This module implements the 8-tier ranking system that determines how well
//! a character's name (or its hexadecimal codepoint) matches a search query,
//! from exact case-sensitive equality down to fuzzy character-by-character
//! matching. Alongside the tier, every match reports which byte ranges of the
//! **original** text were matched so the presentation layer can highlight
//! them, even when case folding or diacritic stripping changed the length of
//! the compared string.

use std::borrow::Cow;
use std::ops::Range;

use memchr::memmem::Finder;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Represents the quality of a match between a text field and a query.
///
/// The ranking system has 8 tiers ordered from best to worst:
///
/// | Tier                 | Value | Description                                   |
/// |----------------------|-------|-----------------------------------------------|
/// | `CaseSensitiveEqual` | 7     | Exact match                                   |
/// | `Equal`              | 6     | Case-insensitive full match                   |
/// | `StartsWith`         | 5     | Text starts with query (case-insensitive)     |
/// | `WordStartsWith`     | 4     | A word in the text starts with query          |
/// | `Contains`           | 3     | Text contains query as substring              |
/// | `Acronym`            | 2     | Query matches the text's acronym              |
/// | `Matches(f64)`       | 1..2  | Fuzzy in-order character match with sub-score |
/// | `NoMatch`            | 0     | No match found                                |
///
/// # Ordering
///
/// `Ranking` implements [`PartialOrd`] such that higher-quality matches compare
/// as greater. For two `Matches` variants, the one with the higher sub-score
/// is greater.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    /// Exact match after optional diacritic stripping (tier 7).
    CaseSensitiveEqual,
    /// Case-insensitive full match (tier 6).
    Equal,
    /// Text starts with the query, case-insensitively (tier 5).
    StartsWith,
    /// A word boundary within the text starts with the query (tier 4).
    WordStartsWith,
    /// Text contains the query as a substring (tier 3).
    Contains,
    /// Query matches the text's acronym (tier 2).
    Acronym,
    /// Fuzzy in-order character match with a continuous sub-score in `(1.0, 2.0]`.
    ///
    /// The sub-score is `1.0 + 1.0 / spread` where `spread` is the distance
    /// between the first and last matched character positions.
    Matches(f64),
    /// No match found (tier 0).
    NoMatch,
}

impl Ranking {
    /// Returns the integer tier value for this ranking.
    fn tier_value(&self) -> u8 {
        match self {
            Ranking::CaseSensitiveEqual => 7,
            Ranking::Equal => 6,
            Ranking::StartsWith => 5,
            Ranking::WordStartsWith => 4,
            Ranking::Contains => 3,
            Ranking::Acronym => 2,
            // Matches uses the sub-score for ordering, but its base tier is 1.
            Ranking::Matches(_) => 1,
            Ranking::NoMatch => 0,
        }
    }

    /// Numeric score for display: the tier value, or the sub-score for
    /// [`Ranking::Matches`].
    ///
    /// ```
    /// use unicode_search::Ranking;
    ///
    /// assert_eq!(Ranking::Contains.score(), 3.0);
    /// assert_eq!(Ranking::Matches(1.5).score(), 1.5);
    /// ```
    pub fn score(&self) -> f64 {
        match self {
            Ranking::Matches(sub_score) => *sub_score,
            other => f64::from(other.tier_value()),
        }
    }
}

// Two `Matches` variants are equal iff their sub-scores are equal; every
// other pair compares by tier.
impl PartialEq for Ranking {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ranking::Matches(a), Ranking::Matches(b)) => a == b,
            _ => self.tier_value() == other.tier_value(),
        }
    }
}

// A `Matches` variant vs. a fixed tier is compared by tier value, so
// `Acronym` (tier 2) always outranks `Matches` even at its maximum of 2.0.
impl PartialOrd for Ranking {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Ranking::Matches(a), Ranking::Matches(b)) => a.partial_cmp(b),
            _ => self.tier_value().partial_cmp(&other.tier_value()),
        }
    }
}

/// The result of matching one text field against a query.
///
/// `spans` are byte ranges into the original text, sorted and non-overlapping.
/// A real match always carries at least one span; [`Ranking::NoMatch`] never
/// does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMatch {
    /// Match tier.
    pub ranking: Ranking,
    /// Matched byte ranges of the original text.
    pub spans: Vec<Range<usize>>,
}

impl TextMatch {
    /// Construct a match from a tier and its spans.
    pub fn new(ranking: Ranking, spans: Vec<Range<usize>>) -> Self {
        Self { ranking, spans }
    }

    /// The empty, non-matching result.
    pub fn no_match() -> Self {
        Self::new(Ranking::NoMatch, Vec::new())
    }

    /// Whether at least one span of the text was matched.
    pub fn is_match(&self) -> bool {
        !self.spans.is_empty()
    }
}

/// Compute a fuzzy closeness ranking via greedy forward character matching.
///
/// For each character in `query`, scans forward through `candidate` to find it.
/// If all query characters are found in order, the ranking is based on how
/// closely together they appear (the "spread").
///
/// # Returns
///
/// - [`Ranking::NoMatch`] if any query character cannot be found in order
/// - `Ranking::Matches(2.0)` when `spread == 0` (single-character query)
/// - `Ranking::Matches(1.0 + 1.0 / spread)` otherwise
///
/// # Examples
///
/// ```
/// use unicode_search::ranking::{get_closeness_ranking, Ranking};
///
/// let rank = get_closeness_ranking("playground", "plgnd");
/// assert!(matches!(rank, Ranking::Matches(s) if s > 1.0 && s < 2.0));
///
/// assert_eq!(get_closeness_ranking("abc", "xyz"), Ranking::NoMatch);
/// assert_eq!(get_closeness_ranking("ab", "a"), Ranking::Matches(2.0));
/// ```
pub fn get_closeness_ranking(candidate: &str, query: &str) -> Ranking {
    closeness(candidate, query).map_or(Ranking::NoMatch, |(ranking, _)| ranking)
}

/// Greedy in-order scan returning the ranking and the byte range of every
/// matched candidate character.
fn closeness(candidate: &str, query: &str) -> Option<(Ranking, Vec<Range<usize>>)> {
    let mut candidate_chars = candidate.char_indices().enumerate();

    let mut first_match_index: Option<usize> = None;
    let mut last_match_index: usize = 0;
    let mut matched = Vec::new();

    for query_char in query.chars() {
        let (pos, (byte, c)) = candidate_chars.find(|&(_, (_, c))| c == query_char)?;
        if first_match_index.is_none() {
            first_match_index = Some(pos);
        }
        last_match_index = pos;
        matched.push(byte..byte + c.len_utf8());
    }

    let spread = last_match_index - first_match_index.unwrap_or(0);
    let ranking = if spread == 0 {
        Ranking::Matches(2.0)
    } else {
        Ranking::Matches(1.0 + 1.0 / spread as f64)
    };
    Some((ranking, matched))
}

/// Returns whether `c` is an acronym word-boundary delimiter.
fn is_acronym_delimiter(c: char) -> bool {
    c == ' ' || c == '-'
}

/// Word-initial characters of `s` with their byte offsets.
fn acronym_initials(s: &str) -> Vec<(usize, char)> {
    // Space and hyphen are single-byte ASCII, so a byte count is a good
    // capacity estimate for the number of words.
    let word_count_estimate = 1 + memchr::memchr2_iter(b' ', b'-', s.as_bytes()).count();
    let mut initials = Vec::with_capacity(word_count_estimate);

    // The first character is always included (virtual leading delimiter).
    let mut prev = ' ';
    for (pos, c) in s.char_indices() {
        if is_acronym_delimiter(prev) && !is_acronym_delimiter(c) {
            initials.push((pos, c));
        }
        prev = c;
    }

    initials
}

/// Extract the acronym from a string by collecting word-initial characters.
///
/// Word boundaries are space (`' '`) and hyphen (`'-'`) only. The caller is
/// responsible for lowercasing the input before calling.
///
/// # Examples
///
/// ```
/// use unicode_search::ranking::get_acronym;
///
/// assert_eq!(get_acronym("black-letter capital"), "blc");
/// assert_eq!(get_acronym("hot beverage"), "hb");
/// assert_eq!(get_acronym(""), "");
/// ```
pub fn get_acronym(s: &str) -> String {
    acronym_initials(s).into_iter().map(|(_, c)| c).collect()
}

/// Prepare a string for comparison by optionally stripping diacritics.
///
/// When `keep_diacritics` is `false`, applies Unicode NFD decomposition and
/// removes combining marks. Returns [`Cow::Borrowed`] whenever nothing had to
/// be removed.
///
/// # Examples
///
/// ```
/// use unicode_search::ranking::prepare_value_for_comparison;
///
/// let result = prepare_value_for_comparison("caf\u{00E9}", false);
/// assert_eq!(result, "cafe");
///
/// let result = prepare_value_for_comparison("caf\u{00E9}", true);
/// assert_eq!(result, "caf\u{00E9}");
/// ```
pub fn prepare_value_for_comparison(s: &str, keep_diacritics: bool) -> Cow<'_, str> {
    // ASCII strings never contain diacritics or combining marks.
    if keep_diacritics || s.is_ascii() {
        return Cow::Borrowed(s);
    }

    let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();

    if stripped == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(stripped)
    }
}

/// A case-folded (and optionally diacritic-stripped) copy of a text, with a
/// map from every folded byte back to the original character it came from.
struct FoldedText {
    folded: String,
    /// `origins[i]` is the byte range of the original character that
    /// produced folded byte `i`.
    origins: Vec<Range<usize>>,
    char_count: usize,
}

impl FoldedText {
    fn new(text: &str, keep_diacritics: bool) -> Self {
        if text.is_ascii() {
            return Self {
                folded: text.to_ascii_lowercase(),
                origins: (0..text.len()).map(|i| i..i + 1).collect(),
                char_count: text.len(),
            };
        }

        let mut folded = String::with_capacity(text.len());
        let mut origins = Vec::with_capacity(text.len());
        let mut char_count = 0;

        for (start, c) in text.char_indices() {
            let origin = start..start + c.len_utf8();
            let mut push = |lower: char| {
                folded.push(lower);
                origins.extend(std::iter::repeat_n(origin.clone(), lower.len_utf8()));
                char_count += 1;
            };

            if keep_diacritics {
                c.to_lowercase().for_each(&mut push);
            } else {
                std::iter::once(c)
                    .nfd()
                    .filter(|d| !is_combining_mark(*d))
                    .flat_map(char::to_lowercase)
                    .for_each(&mut push);
            }
        }

        Self {
            folded,
            origins,
            char_count,
        }
    }

    /// Map folded byte ranges to sorted, merged ranges of the original text.
    fn spans<I>(&self, ranges: I) -> Vec<Range<usize>>
    where
        I: IntoIterator<Item = Range<usize>>,
    {
        let mut mapped: Vec<Range<usize>> = ranges
            .into_iter()
            .filter(|r| !r.is_empty() && r.end <= self.origins.len())
            .map(|r| self.origins[r.start].start..self.origins[r.end - 1].end)
            .collect();
        mapped.sort_by_key(|r| r.start);

        let mut merged: Vec<Range<usize>> = Vec::with_capacity(mapped.len());
        for range in mapped {
            match merged.last_mut() {
                Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
                _ => merged.push(range),
            }
        }
        merged
    }
}

/// The whole text as a single span, or no span for an empty text.
fn whole(text: &str) -> Vec<Range<usize>> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![0..text.len()]
    }
}

/// Pre-computed query data for amortizing repeated per-character matching.
///
/// Caches the prepared query, its folded form, character count and a
/// SIMD-accelerated substring finder so that matching a whole catalog against
/// one query does the query-side work once.
pub struct PreparedQuery {
    /// The query after optional diacritics stripping.
    prepared: String,
    /// Case-folded form of the query.
    folded: String,
    char_count: usize,
    keep_diacritics: bool,
    /// `None` when the folded query is empty, since `memmem` needs a needle.
    finder: Option<Finder<'static>>,
}

impl PreparedQuery {
    /// Prepare and fold the query once.
    pub fn new(query: &str, keep_diacritics: bool) -> Self {
        let prepared = prepare_value_for_comparison(query, keep_diacritics).into_owned();
        let folded = FoldedText::new(query, keep_diacritics);
        let finder = if folded.folded.is_empty() {
            None
        } else {
            Some(Finder::new(folded.folded.as_bytes()).into_owned())
        };
        Self {
            prepared,
            char_count: folded.char_count,
            folded: folded.folded,
            keep_diacritics,
            finder,
        }
    }

    /// Whether the query folds to nothing.
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Match `text` against this query.
    ///
    /// Tiers are checked in descending order of specificity and the first
    /// one that applies is returned together with its spans:
    ///
    /// 1. More query characters than text characters: no match.
    /// 2. Prepared strings identical: `CaseSensitiveEqual`, whole text.
    /// 3. Folded strings identical: `Equal`, whole text.
    /// 4. Folded text starts with the query: `StartsWith`.
    /// 5. Query found right after a space: `WordStartsWith`.
    /// 6. Query found anywhere: `Contains` (first occurrence).
    /// 7. Single-character queries stop here.
    /// 8. Query inside the acronym: `Acronym`, one span per initial.
    /// 9. Greedy in-order scan: `Matches`, one span per character.
    pub fn match_text(&self, text: &str) -> TextMatch {
        let candidate = FoldedText::new(text, self.keep_diacritics);

        if self.char_count > candidate.char_count {
            return TextMatch::no_match();
        }

        if *prepare_value_for_comparison(text, self.keep_diacritics) == *self.prepared {
            return TextMatch::new(Ranking::CaseSensitiveEqual, whole(text));
        }

        let Some(finder) = &self.finder else {
            // Empty query: trivially found at position 0, nothing to highlight.
            let ranking = if candidate.folded.is_empty() {
                Ranking::Equal
            } else {
                Ranking::StartsWith
            };
            return TextMatch::new(ranking, Vec::new());
        };

        let bytes = candidate.folded.as_bytes();
        let query_len = self.folded.len();
        let mut positions = finder.find_iter(bytes);

        if let Some(first) = positions.next() {
            if first == 0 {
                if bytes.len() == query_len {
                    return TextMatch::new(Ranking::Equal, whole(text));
                }
                return TextMatch::new(Ranking::StartsWith, candidate.spans([0..query_len]));
            }

            // Every position after `first` is also > 0.
            let word_start = std::iter::once(first)
                .chain(positions)
                .find(|&pos| bytes[pos - 1] == b' ');
            if let Some(pos) = word_start {
                return TextMatch::new(
                    Ranking::WordStartsWith,
                    candidate.spans([pos..pos + query_len]),
                );
            }

            return TextMatch::new(
                Ranking::Contains,
                candidate.spans([first..first + query_len]),
            );
        }

        if self.char_count == 1 {
            return TextMatch::no_match();
        }

        let initials = acronym_initials(&candidate.folded);
        let acronym: String = initials.iter().map(|&(_, c)| c).collect();
        if let Some(at) = acronym.find(self.folded.as_str()) {
            let end = at + query_len;
            let ranges = acronym
                .char_indices()
                .zip(&initials)
                .filter(|&((i, _), _)| i >= at && i < end)
                .map(|(_, &(pos, c))| pos..pos + c.len_utf8());
            return TextMatch::new(Ranking::Acronym, candidate.spans(ranges));
        }

        match closeness(&candidate.folded, &self.folded) {
            Some((ranking, ranges)) => TextMatch::new(ranking, candidate.spans(ranges)),
            None => TextMatch::no_match(),
        }
    }
}

/// Match `text` against `query` in a single call.
///
/// Convenience wrapper that prepares the query and runs
/// [`PreparedQuery::match_text`]. Prefer [`PreparedQuery`] when matching many
/// texts against the same query.
///
/// # Examples
///
/// ```
/// use unicode_search::ranking::{match_text, Ranking};
///
/// let m = match_text("Black Star", "star", false);
/// assert_eq!(m.ranking, Ranking::WordStartsWith);
/// assert_eq!(m.spans, vec![6..10]);
///
/// assert!(!match_text("Umbrella", "xyz", false).is_match());
/// ```
pub fn match_text(text: &str, query: &str, keep_diacritics: bool) -> TextMatch {
    PreparedQuery::new(query, keep_diacritics).match_text(text)
}

/// Determine only the tier of a match, discarding spans.
///
/// # Examples
///
/// ```
/// use unicode_search::{get_match_ranking, Ranking};
///
/// assert_eq!(get_match_ranking("Star", "Star", false), Ranking::CaseSensitiveEqual);
/// assert_eq!(get_match_ranking("Star", "star", false), Ranking::Equal);
/// assert_eq!(get_match_ranking("Star of David", "star", false), Ranking::StartsWith);
/// assert_eq!(get_match_ranking("Star", "xyz", false), Ranking::NoMatch);
/// ```
pub fn get_match_ranking(text: &str, query: &str, keep_diacritics: bool) -> Ranking {
    match_text(text, query, keep_diacritics).ranking
}
