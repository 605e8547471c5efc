//! Usage-history comparators and the per-session usage statistics.
//!
//! [`compare_characters`] is the general ordering of two catalog characters
//! by their history alone: usage-tracked characters first (most recently
//! used, then most used), untracked ones after, names as the final
//! tiebreaker. [`UsageDisplayStatistics`] holds the two thresholds the
//! ranking engine uses for its coarse recent/frequent boost.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::character::{Character, UsageInfo};
use crate::order::{compare_dates, compare_nullable, compare_numbers, inverse};

/// Ordinal comparison of character names.
///
/// Byte-wise `str` ordering, never locale collation, so the output is the
/// same on every machine. Identical names fall back to the codepoint.
pub fn compare_unicode_names(left: &Character, right: &Character) -> Ordering {
    left.name
        .cmp(&right.name)
        .then_with(|| left.codepoint.cmp(&right.codepoint))
}

/// Order two usage records: most recently used first, then most used first.
///
/// A record without a timestamp sorts after every record with one.
pub fn compare_usage_tracked_characters(left: &UsageInfo, right: &UsageInfo) -> Ordering {
    compare_nullable(left.last_used.as_ref(), right.last_used.as_ref(), |l, r| {
        inverse(compare_dates(l, r))
    })
    .then_with(|| {
        inverse(compare_numbers(
            f64::from(left.use_count),
            f64::from(right.use_count),
        ))
    })
}

/// Order two arbitrary characters by usage history, then by name.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use unicode_search::{Character, compare_characters};
///
/// let used = Character::new("☕", "Hot Beverage").with_usage(None, 1);
/// let unused = Character::new("★", "Black Star");
///
/// // Tracked before untracked, regardless of name.
/// assert_eq!(compare_characters(&used, &unused), Ordering::Less);
/// ```
pub fn compare_characters(left: &Character, right: &Character) -> Ordering {
    compare_nullable(
        left.usage.as_ref(),
        right.usage.as_ref(),
        compare_usage_tracked_characters,
    )
    .then_with(|| compare_unicode_names(left, right))
}

/// Thresholds for the recent/frequent boost, computed once per search
/// session from the usage-tracked characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageDisplayStatistics {
    /// Recency cutoff: characters used at or after this instant are "recent".
    pub top_third_recently_used: DateTime<Utc>,
    /// Mean use count: characters used at least this often are "frequent".
    pub average_use_count: f64,
}

impl Default for UsageDisplayStatistics {
    /// Statistics of an empty history: the epoch and zero.
    fn default() -> Self {
        Self {
            top_third_recently_used: DateTime::<Utc>::UNIX_EPOCH,
            average_use_count: 0.0,
        }
    }
}

impl UsageDisplayStatistics {
    /// Derive the thresholds from the used characters.
    ///
    /// The recency cutoff is the `recent_rank`-th most recent timestamp
    /// (1-based). When fewer timestamps exist, it falls back to the epoch,
    /// which makes every character with a timestamp "recent".
    ///
    /// # Arguments
    ///
    /// * `used` - Characters with usage history; untracked entries are ignored
    /// * `recent_rank` - Which most-recent use defines the cutoff
    pub fn from_used(used: &[Character], recent_rank: usize) -> Self {
        let uses = most_recent_uses(used);
        let top_third_recently_used = recent_rank
            .checked_sub(1)
            .and_then(|index| uses.get(index).copied())
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Self {
            top_third_recently_used,
            average_use_count: average_use_count(used),
        }
    }

    /// Used at or after the recency cutoff.
    pub fn is_recent(&self, character: &Character) -> bool {
        character
            .last_used()
            .is_some_and(|at| at >= self.top_third_recently_used)
    }

    /// Tracked, with a use count at or above the average.
    pub fn is_frequent(&self, character: &Character) -> bool {
        character
            .usage
            .as_ref()
            .is_some_and(|usage| f64::from(usage.use_count) >= self.average_use_count)
    }

    /// Whether the character lands in the boosted tier.
    pub fn is_boosted(&self, character: &Character) -> bool {
        self.is_recent(character) || self.is_frequent(character)
    }
}

/// Timestamps of all tracked characters, most recent first.
pub fn most_recent_uses(characters: &[Character]) -> Vec<DateTime<Utc>> {
    let mut uses: Vec<DateTime<Utc>> = characters.iter().filter_map(Character::last_used).collect();
    uses.sort_unstable_by(|l, r| inverse(compare_dates(l, r)));
    uses
}

/// Tracked characters in usage order (most recently used first).
pub fn most_recently_used(characters: &[Character]) -> Vec<&Character> {
    let mut used: Vec<&Character> = characters
        .iter()
        .filter(|c| c.is_usage_tracked())
        .collect();
    used.sort_by(|l, r| compare_characters(l, r));
    used
}

/// Arithmetic mean of the use counts of tracked characters, `0.0` if none.
pub fn average_use_count(characters: &[Character]) -> f64 {
    let (sum, count) = characters
        .iter()
        .filter_map(|c| c.usage.as_ref())
        .fold((0u64, 0u32), |(sum, count), usage| {
            (sum + u64::from(usage.use_count), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum as f64 / f64::from(count)
    }
}

/// Tracked characters used strictly more often than `average`, in usage order.
pub fn often_used(characters: &[Character], average: f64) -> Vec<&Character> {
    most_recently_used(characters)
        .into_iter()
        .filter(|c| f64::from(c.use_count()) > average)
        .collect()
}
