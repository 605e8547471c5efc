//! Comparator combinators shared by the usage and ranking comparators.
//!
//! All comparators return [`std::cmp::Ordering`] and follow one convention:
//! [`Ordering::Less`] means "the left side is shown first". Every
//! "higher is better" key is therefore expressed by [`inverse`]-ing an
//! ascending comparator.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Flip [`Ordering::Less`] and [`Ordering::Greater`], keeping [`Ordering::Equal`].
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use unicode_search::order::inverse;
///
/// assert_eq!(inverse(Ordering::Less), Ordering::Greater);
/// assert_eq!(inverse(Ordering::Equal), Ordering::Equal);
/// ```
pub fn inverse(order: Ordering) -> Ordering {
    order.reverse()
}

/// Compare two optional values, ranking present values ahead of absent ones.
///
/// | left      | right     | result                          |
/// |-----------|-----------|---------------------------------|
/// | `Some(l)` | `Some(r)` | `compare_both_present(l, r)`    |
/// | `Some(_)` | `None`    | `Less` (left first)             |
/// | `None`    | `Some(_)` | `Greater` (right first)         |
/// | `None`    | `None`    | `Equal`                         |
///
/// # Arguments
///
/// * `left` - Left value, `None` when absent
/// * `right` - Right value, `None` when absent
/// * `compare_both_present` - Comparator invoked only when both sides are present
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use unicode_search::order::compare_nullable;
///
/// assert_eq!(compare_nullable(Some(&1), None, |l, r| l.cmp(r)), Ordering::Less);
/// assert_eq!(compare_nullable::<i32, _>(None, None, |l, r| l.cmp(&r)), Ordering::Equal);
/// assert_eq!(compare_nullable(Some(&2), Some(&1), |l, r| l.cmp(r)), Ordering::Greater);
/// ```
pub fn compare_nullable<T, F>(left: Option<T>, right: Option<T>, compare_both_present: F) -> Ordering
where
    F: FnOnce(T, T) -> Ordering,
{
    match (left, right) {
        (Some(l), Some(r)) => compare_both_present(l, r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ascending numeric comparison.
///
/// NaN is treated as an absent value: it sorts after every number, and two
/// NaNs compare equal. This keeps the comparator a total order.
pub fn compare_numbers(left: f64, right: f64) -> Ordering {
    compare_nullable(
        Some(left).filter(|v| !v.is_nan()),
        Some(right).filter(|v| !v.is_nan()),
        |l, r| l.total_cmp(&r),
    )
}

/// Ascending (oldest first) timestamp comparison.
pub fn compare_dates(left: &DateTime<Utc>, right: &DateTime<Utc>) -> Ordering {
    left.cmp(right)
}

/// Parse a stored timestamp.
///
/// Accepted forms, tried in order:
///
/// 1. RFC 3339 (`2024-01-09T12:00:00Z`, `2024-01-09T12:00:00.123+02:00`)
/// 2. Naive ISO date-time without offset, read as UTC (`2024-01-09T12:00:00`)
/// 3. Integer milliseconds since the Unix epoch (`1704801600000`)
///
/// Anything else (including the empty string) yields `None`, which the
/// comparators treat exactly like a never-used character. Invalid timestamps
/// are never an error.
///
/// # Examples
///
/// ```
/// use unicode_search::order::parse_timestamp;
///
/// assert!(parse_timestamp("2024-01-09T00:00:00Z").is_some());
/// assert!(parse_timestamp("1704801600000").is_some());
/// assert!(parse_timestamp("Invalid Date").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}
