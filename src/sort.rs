//! Ordering of matched characters.
//!
//! Provides the composite comparator used by the search pipeline. Each level
//! only runs when every level above it reports [`Ordering::Equal`]:
//!
//! 1. **Pinned first**, lower pin order first among pinned characters.
//! 2. **Stronger text match first** (no-op in browse mode).
//! 3. **Boosted tier first**: recently used (at or after the recency cutoff)
//!    or frequently used (at or above the average use count).
//! 4. **Usage history**: most recently used, then most used; tracked before
//!    untracked.
//! 5. **Name**, ordinal, as the deterministic tiebreaker.

use std::cmp::Ordering;

use crate::character::Character;
use crate::order::{compare_nullable, inverse};
use crate::search::CharacterMatch;
use crate::usage::{UsageDisplayStatistics, compare_characters};

/// Pinned characters before unpinned ones; pinned ones by ascending order.
pub fn compare_pins(left: &Character, right: &Character) -> Ordering {
    compare_nullable(left.pin, right.pin, |l, r| l.cmp(&r))
}

/// Stronger best-field match first. Two null matches are equal.
pub fn compare_match_quality(left: &CharacterMatch, right: &CharacterMatch) -> Ordering {
    compare_nullable(left.best_ranking(), right.best_ranking(), |l, r| {
        // `partial_cmp` is `None` only for a NaN sub-score; treat as equal.
        inverse(l.partial_cmp(&r).unwrap_or(Ordering::Equal))
    })
}

/// Boosted characters before the rest; no finer distinction inside a tier.
pub fn compare_usage_tiers(
    left: &Character,
    right: &Character,
    statistics: &UsageDisplayStatistics,
) -> Ordering {
    inverse(statistics.is_boosted(left).cmp(&statistics.is_boosted(right)))
}

/// Five-level comparator for ordering matched characters.
///
/// # Arguments
///
/// * `left` - First candidate
/// * `right` - Second candidate
/// * `statistics` - Session thresholds for the boosted tier
///
/// # Returns
///
/// [`Ordering`] suitable for [`slice::sort_by`]: `Less` means `left` is
/// shown first.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use unicode_search::{Character, CharacterMatch, UsageDisplayStatistics, compare_character_matches};
///
/// let stats = UsageDisplayStatistics::default();
/// let pinned = CharacterMatch::null(Character::new("☂", "Umbrella").with_pin(0));
/// let plain = CharacterMatch::null(Character::new("★", "Black Star"));
///
/// assert_eq!(compare_character_matches(&pinned, &plain, &stats), Ordering::Less);
/// ```
pub fn compare_character_matches(
    left: &CharacterMatch,
    right: &CharacterMatch,
    statistics: &UsageDisplayStatistics,
) -> Ordering {
    compare_pins(&left.character, &right.character)
        .then_with(|| compare_match_quality(left, right))
        .then_with(|| compare_usage_tiers(&left.character, &right.character, statistics))
        .then_with(|| compare_characters(&left.character, &right.character))
}

/// Sort candidates in place with [`compare_character_matches`].
///
/// The sort is stable, and the comparator ends in a name/codepoint
/// tiebreaker, so identical inputs always produce identical output.
pub fn rank_and_order(matches: &mut [CharacterMatch], statistics: &UsageDisplayStatistics) {
    matches.sort_by(|l, r| compare_character_matches(l, r, statistics));
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::ranking::PreparedQuery;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn names(matches: &[CharacterMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.character.name.as_str()).collect()
    }

    fn browse(characters: Vec<Character>) -> Vec<CharacterMatch> {
        characters.into_iter().map(CharacterMatch::null).collect()
    }

    fn queried(characters: Vec<Character>, query: &str) -> Vec<CharacterMatch> {
        let query = PreparedQuery::new(query, false);
        characters
            .into_iter()
            .map(|c| CharacterMatch::query(c, &query, crate::Ranking::Contains))
            .collect()
    }

    // --- compare_pins ---

    #[test]
    fn pinned_before_unpinned() {
        let pinned = Character::new("b", "Beta").with_pin(5);
        let plain = Character::new("a", "Alpha");
        assert_eq!(compare_pins(&pinned, &plain), Ordering::Less);
    }

    #[test]
    fn lower_pin_order_first() {
        let first = Character::new("b", "Beta").with_pin(0);
        let second = Character::new("a", "Alpha").with_pin(1);
        assert_eq!(compare_pins(&first, &second), Ordering::Less);
    }

    // --- compare_match_quality ---

    #[test]
    fn stronger_match_first() {
        let ranked = queried(
            vec![Character::new("a", "Gamma Star"), Character::new("b", "Star")],
            "star",
        );
        // "Star" is Equal; "Gamma Star" is WordStartsWith.
        assert_eq!(compare_match_quality(&ranked[1], &ranked[0]), Ordering::Less);
    }

    #[test]
    fn null_matches_are_equal_quality() {
        let ranked = browse(vec![Character::new("a", "Alpha"), Character::new("b", "Beta")]);
        assert_eq!(compare_match_quality(&ranked[0], &ranked[1]), Ordering::Equal);
    }

    // --- compare_usage_tiers ---

    #[test]
    fn boosted_before_unboosted_regardless_of_recency() {
        let stats = UsageDisplayStatistics {
            top_third_recently_used: day(5),
            average_use_count: 5.0,
        };
        // Frequent but old vs. neither recent nor frequent but newer.
        let frequent = Character::new("f", "Frequent").with_usage(Some(day(1)), 9);
        let plain = Character::new("p", "Plain").with_usage(Some(day(4)), 1);
        assert_eq!(compare_usage_tiers(&frequent, &plain, &stats), Ordering::Less);
        // The plain usage comparator alone would put the newer one first.
        assert_eq!(compare_characters(&frequent, &plain), Ordering::Greater);
    }

    // --- compare_character_matches ---

    #[test]
    fn pin_overrides_match_quality() {
        let mut ranked = queried(
            vec![
                Character::new("s", "Star"),
                Character::new("t", "Start Of Text").with_pin(0),
            ],
            "star",
        );
        rank_and_order(&mut ranked, &UsageDisplayStatistics::default());
        assert_eq!(names(&ranked), vec!["Start Of Text", "Star"]);
    }

    #[test]
    fn match_quality_overrides_usage() {
        let stats = UsageDisplayStatistics::default();
        let mut ranked = queried(
            vec![
                Character::new("g", "Gamma Star").with_usage(Some(day(9)), 99),
                Character::new("s", "Star"),
            ],
            "star",
        );
        rank_and_order(&mut ranked, &stats);
        assert_eq!(names(&ranked), vec!["Star", "Gamma Star"]);
    }

    #[test]
    fn browse_mode_orders_by_usage_then_name() {
        let chars = vec![
            Character::new("c", "Charlie"),
            Character::new("a", "Alpha"),
            Character::new("u", "Used").with_usage(Some(day(2)), 1),
        ];
        let stats = UsageDisplayStatistics::from_used(&chars, 3);
        let mut ranked = browse(chars);
        rank_and_order(&mut ranked, &stats);
        assert_eq!(names(&ranked), vec!["Used", "Alpha", "Charlie"]);
    }

    #[test]
    fn all_untracked_collapses_to_name_order() {
        let mut ranked = browse(vec![
            Character::new("z", "Zeta"),
            Character::new("b", "Beta"),
            Character::new("a", "Alpha"),
        ]);
        rank_and_order(&mut ranked, &UsageDisplayStatistics::default());
        assert_eq!(names(&ranked), vec!["Alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let mut ranked: Vec<CharacterMatch> = Vec::new();
        rank_and_order(&mut ranked, &UsageDisplayStatistics::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn comparator_is_antisymmetric() {
        let stats = UsageDisplayStatistics::default();
        let ranked = browse(vec![
            Character::new("a", "Alpha").with_usage(Some(day(3)), 2),
            Character::new("b", "Beta").with_pin(1),
        ]);
        let forward = compare_character_matches(&ranked[0], &ranked[1], &stats);
        let backward = compare_character_matches(&ranked[1], &ranked[0], &stats);
        assert_eq!(forward, inverse(backward));
    }
}
