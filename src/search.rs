//! Matching characters against a query and the synchronous search pipeline.
//!
//! Each catalog character is matched on two fields: its name and its
//! hexadecimal codepoint. An empty query produces the *null match* for every
//! character (browse mode: nothing filtered, nothing highlighted). A
//! non-empty query keeps only characters where at least one field has a
//! matched span.

use std::ops::Range;

use serde::Serialize;

use crate::character::Character;
use crate::options::SearchOptions;
use crate::ranking::{PreparedQuery, Ranking, TextMatch};
use crate::sort::rank_and_order;
use crate::usage::UsageDisplayStatistics;

/// Match of one field (name or codepoint) of a character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    /// Match tier; `None` for the null match.
    pub ranking: Option<Ranking>,
    /// Score shown to the user; `None` for the null match until
    /// [`fill_null_character_match_scores`] runs.
    pub score: Option<f64>,
    /// Matched byte ranges of the field text.
    pub spans: Vec<Range<usize>>,
}

impl FieldMatch {
    /// The browse-mode sentinel: no tier, no score, no spans.
    pub fn null() -> Self {
        Self {
            ranking: None,
            score: None,
            spans: Vec::new(),
        }
    }

    /// Whether this is the browse-mode sentinel.
    pub fn is_null(&self) -> bool {
        self.ranking.is_none()
    }

    /// Whether any span of the field was matched.
    pub fn is_match(&self) -> bool {
        !self.spans.is_empty()
    }
}

impl From<TextMatch> for FieldMatch {
    fn from(text_match: TextMatch) -> Self {
        Self {
            ranking: Some(text_match.ranking),
            score: Some(text_match.ranking.score()),
            spans: text_match.spans,
        }
    }
}

/// A candidate character with its name and codepoint matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterMatch {
    /// The matched character.
    pub character: Character,
    /// Match against [`Character::name`].
    pub name: FieldMatch,
    /// Match against [`Character::hexadecimal`].
    pub codepoint: FieldMatch,
}

impl CharacterMatch {
    /// Browse-mode match: both fields carry the null match.
    pub fn null(character: Character) -> Self {
        Self {
            character,
            name: FieldMatch::null(),
            codepoint: FieldMatch::null(),
        }
    }

    /// Match `character` against a prepared, non-empty query.
    ///
    /// Codepoint matches weaker than `codepoint_threshold` are discarded.
    pub fn query(character: Character, query: &PreparedQuery, codepoint_threshold: Ranking) -> Self {
        let name = query.match_text(&character.name);
        let mut codepoint = query.match_text(&character.hexadecimal());
        if codepoint.ranking < codepoint_threshold {
            codepoint = TextMatch::no_match();
        }

        Self {
            character,
            name: name.into(),
            codepoint: codepoint.into(),
        }
    }

    /// Whether the name or the codepoint has at least one matched span.
    pub fn matched_name_or_codepoint(&self) -> bool {
        self.name.is_match() || self.codepoint.is_match()
    }

    /// The stronger of the two field tiers; `None` in browse mode.
    pub fn best_ranking(&self) -> Option<Ranking> {
        match (self.name.ranking, self.codepoint.ranking) {
            (Some(name), Some(codepoint)) => Some(if codepoint > name { codepoint } else { name }),
            (name, codepoint) => name.or(codepoint),
        }
    }
}

/// Replace null-match scores with `default_score` for presentation.
///
/// Runs strictly after sorting; it only touches `score`, never `ranking`, so
/// it cannot change the order.
pub fn fill_null_character_match_scores(
    mut character_match: CharacterMatch,
    default_score: f64,
) -> CharacterMatch {
    for field in [&mut character_match.name, &mut character_match.codepoint] {
        if field.score.is_none() {
            field.score = Some(default_score);
        }
    }
    character_match
}

/// Run the whole synchronous pipeline over a loaded catalog.
///
/// 1. Empty query: every character gets the null match. Otherwise every
///    character is matched and non-matches are dropped.
/// 2. Candidates are ordered by [`rank_and_order`].
/// 3. Null-match scores are filled for display.
///
/// # Arguments
///
/// * `characters` - The full catalog, in any order
/// * `query` - The raw search string
/// * `statistics` - Session usage thresholds
/// * `options` - Matching and display options
///
/// # Examples
///
/// ```
/// use unicode_search::{Character, SearchOptions, UsageDisplayStatistics, search_characters};
///
/// let catalog = vec![Character::new("α", "Alpha"), Character::new("β", "Beta")];
/// let stats = UsageDisplayStatistics::default();
/// let opts = SearchOptions::default();
///
/// assert_eq!(search_characters(catalog.clone(), "", &stats, &opts).len(), 2);
/// assert!(search_characters(catalog, "xyz", &stats, &opts).is_empty());
/// ```
pub fn search_characters(
    characters: Vec<Character>,
    query: &str,
    statistics: &UsageDisplayStatistics,
    options: &SearchOptions,
) -> Vec<CharacterMatch> {
    let prepared = PreparedQuery::new(query, options.keep_diacritics);

    let mut matches: Vec<CharacterMatch> = if query.is_empty() {
        characters.into_iter().map(CharacterMatch::null).collect()
    } else {
        characters
            .into_iter()
            .map(|c| CharacterMatch::query(c, &prepared, options.codepoint_threshold))
            .filter(CharacterMatch::matched_name_or_codepoint)
            .collect()
    };

    rank_and_order(&mut matches, statistics);

    matches
        .into_iter()
        .map(|m| fill_null_character_match_scores(m, options.null_match_score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str) -> PreparedQuery {
        PreparedQuery::new(text, false)
    }

    #[test]
    fn null_match_has_no_spans_and_no_score() {
        let m = CharacterMatch::null(Character::new("★", "Star"));
        assert!(m.name.is_null());
        assert!(m.codepoint.is_null());
        assert!(!m.matched_name_or_codepoint());
        assert_eq!(m.best_ranking(), None);
    }

    #[test]
    fn name_match_qualifies() {
        let m = CharacterMatch::query(Character::new("★", "Star"), &query("sta"), Ranking::Contains);
        assert!(m.matched_name_or_codepoint());
        assert_eq!(m.name.ranking, Some(Ranking::StartsWith));
        assert_eq!(m.name.spans, vec![0..3]);
        assert!(!m.codepoint.is_match());
    }

    #[test]
    fn codepoint_match_qualifies() {
        let m = CharacterMatch::query(Character::new("★", "Star"), &query("2605"), Ranking::Contains);
        assert!(m.matched_name_or_codepoint());
        assert_eq!(m.codepoint.ranking, Some(Ranking::CaseSensitiveEqual));
        assert!(!m.name.is_match());
        assert_eq!(m.best_ranking(), Some(Ranking::CaseSensitiveEqual));
    }

    #[test]
    fn weak_codepoint_match_is_discarded() {
        // "25" is a fuzzy hit on "2605" but below the Contains threshold.
        let m = CharacterMatch::query(Character::new("★", "Star"), &query("25"), Ranking::Contains);
        assert_eq!(m.codepoint.ranking, Some(Ranking::NoMatch));
        assert!(!m.matched_name_or_codepoint());
    }

    #[test]
    fn best_ranking_takes_stronger_field() {
        let m = CharacterMatch::query(
            Character::new("A", "Latin Capital Letter A"),
            &query("41"),
            Ranking::Contains,
        );
        // The name has no "41"; the codepoint "0041" ends with it.
        assert_eq!(m.name.ranking, Some(Ranking::NoMatch));
        assert_eq!(m.best_ranking(), Some(Ranking::Contains));
    }

    #[test]
    fn fill_replaces_only_null_scores() {
        let null = fill_null_character_match_scores(CharacterMatch::null(Character::new("★", "Star")), 0.0);
        assert_eq!(null.name.score, Some(0.0));
        assert_eq!(null.codepoint.score, Some(0.0));
        // The tier stays absent; only the display score changes.
        assert_eq!(null.name.ranking, None);

        let ranked = CharacterMatch::query(Character::new("★", "Star"), &query("star"), Ranking::Contains);
        let filled = fill_null_character_match_scores(ranked.clone(), -1.0);
        assert_eq!(filled, ranked);
    }

    #[test]
    fn empty_query_is_browse_mode() {
        let out = search_characters(
            vec![Character::new("★", "Star")],
            "",
            &UsageDisplayStatistics::default(),
            &SearchOptions::default(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name.score, Some(0.0));
    }

    #[test]
    fn combining_mark_query_is_not_browse_mode() {
        // Folds to nothing once diacritics are stripped, but is not empty.
        let out = search_characters(
            vec![Character::new("★", "Star"), Character::new("é", "Latin Small Letter E With Acute")],
            "\u{301}",
            &UsageDisplayStatistics::default(),
            &SearchOptions::default(),
        );
        assert!(out.is_empty());
    }
}
