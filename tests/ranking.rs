//! Integration tests for the text match primitive.
//!
//! Exercises only the public API: [`match_text`], [`get_match_ranking`],
//! [`PreparedQuery`] and [`Ranking`]. Every test checks both the tier and the
//! byte spans reported against the original text.

use unicode_search::{PreparedQuery, Ranking, get_match_ranking, match_text};

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[test]
fn case_sensitive_equal_spans_whole_text() {
    let m = match_text("Green", "Green", false);
    assert_eq!(m.ranking, Ranking::CaseSensitiveEqual);
    assert_eq!(m.spans, vec![0..5]);
}

#[test]
fn equal_ignores_case() {
    let m = match_text("Green", "green", false);
    assert_eq!(m.ranking, Ranking::Equal);
    assert_eq!(m.spans, vec![0..5]);
}

#[test]
fn starts_with_highlights_prefix() {
    let m = match_text("Greenland", "green", false);
    assert_eq!(m.ranking, Ranking::StartsWith);
    assert_eq!(m.spans, vec![0..5]);
}

#[test]
fn word_starts_with_highlights_word() {
    let m = match_text("San Francisco", "fran", false);
    assert_eq!(m.ranking, Ranking::WordStartsWith);
    assert_eq!(m.spans, vec![4..8]);
}

#[test]
fn word_start_preferred_over_earlier_substring() {
    // "star" first occurs inside "Upstart", but also starts the word "Star".
    let m = match_text("Upstart Star", "star", false);
    assert_eq!(m.ranking, Ranking::WordStartsWith);
    assert_eq!(m.spans, vec![8..12]);
}

#[test]
fn contains_highlights_first_occurrence() {
    let m = match_text("abcdef", "cde", false);
    assert_eq!(m.ranking, Ranking::Contains);
    assert_eq!(m.spans, vec![2..5]);
}

#[test]
fn acronym_highlights_each_initial() {
    let m = match_text("North-West Airlines", "nwa", false);
    assert_eq!(m.ranking, Ranking::Acronym);
    assert_eq!(m.spans, vec![0..1, 6..7, 11..12]);
}

#[test]
fn fuzzy_match_highlights_matched_characters() {
    let m = match_text("playground", "plgnd", false);
    assert!(matches!(m.ranking, Ranking::Matches(s) if s > 1.0 && s < 2.0));
    assert_eq!(m.spans, vec![0..2, 4..5, 8..10]);
}

#[test]
fn no_match_has_no_spans() {
    let m = match_text("Umbrella", "xyz", false);
    assert_eq!(m.ranking, Ranking::NoMatch);
    assert!(m.spans.is_empty());
    assert!(!m.is_match());
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn query_longer_than_text_never_matches() {
    assert_eq!(get_match_ranking("ab", "abc", false), Ranking::NoMatch);
}

#[test]
fn single_character_query_skips_fuzzy_tiers() {
    assert_eq!(get_match_ranking("abc", "x", false), Ranking::NoMatch);
    let m = match_text("abc", "b", false);
    assert_eq!(m.ranking, Ranking::Contains);
    assert_eq!(m.spans, vec![1..2]);
}

#[test]
fn hexadecimal_codepoint_prefix() {
    let m = match_text("2605", "26", false);
    assert_eq!(m.ranking, Ranking::StartsWith);
    assert_eq!(m.spans, vec![0..2]);
}

#[test]
fn non_ascii_case_folding() {
    let m = match_text("ΑΛΦΑ", "αλφα", false);
    assert_eq!(m.ranking, Ranking::Equal);
    assert_eq!(m.spans, vec![0..8]);
}

// ---------------------------------------------------------------------------
// Diacritics
// ---------------------------------------------------------------------------

#[test]
fn stripped_diacritics_map_spans_to_original_bytes() {
    let m = match_text("Crème Brûlée", "creme", false);
    assert_eq!(m.ranking, Ranking::StartsWith);
    // "è" is two bytes in the original text.
    assert_eq!(m.spans, vec![0..6]);
}

#[test]
fn kept_diacritics_do_not_match_plain_letters() {
    assert_eq!(get_match_ranking("Crème", "creme", true), Ranking::NoMatch);
    assert_eq!(get_match_ranking("Crème", "crème", true), Ranking::Equal);
}

// ---------------------------------------------------------------------------
// PreparedQuery
// ---------------------------------------------------------------------------

#[test]
fn prepared_query_agrees_with_one_shot_matching() {
    let query = PreparedQuery::new("star", false);
    for text in ["Star", "Black Star", "Starfish", "Mustard", "Umbrella"] {
        assert_eq!(query.match_text(text), match_text(text, "star", false), "{text}");
    }
}

#[test]
fn whitespace_only_query_is_not_empty() {
    assert!(PreparedQuery::new("", false).is_empty());
    assert!(!PreparedQuery::new(" ", false).is_empty());
}

// ---------------------------------------------------------------------------
// Tier ordering
// ---------------------------------------------------------------------------

#[test]
fn acronym_outranks_best_fuzzy_match() {
    assert!(Ranking::Acronym > Ranking::Matches(2.0));
    assert!(Ranking::Matches(2.0) > Ranking::Matches(1.1));
    assert!(Ranking::Matches(1.1) > Ranking::NoMatch);
}
