//! Catalog characters and their usage history.
//!
//! A [`Character`] either carries a [`UsageInfo`] record (it is
//! *usage-tracked*) or it does not. The ranking comparators branch on that
//! single `Option`, never on a runtime type.
//!
//! Characters are (de)serialized through a flat camelCase record, the shape
//! the usage store persists:
//!
//! ```json
//! { "codepoint": "★", "name": "Star", "pin": 0, "lastUsed": "2024-01-09T00:00:00Z", "useCount": 1 }
//! ```
//!
//! Timestamps are parsed at this boundary with
//! [`parse_timestamp`](crate::order::parse_timestamp); malformed values become
//! absent rather than failing the whole catalog.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::order::parse_timestamp;

/// Usage statistics of one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageInfo {
    /// Timestamp of the last insertion. `None` when never used or when the
    /// stored value could not be parsed.
    pub last_used: Option<DateTime<Utc>>,
    /// Number of recorded insertions.
    pub use_count: u32,
}

/// A single entry of the character catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CharacterRecord", into = "CharacterRecord")]
pub struct Character {
    /// The literal character (one or more Unicode scalars).
    pub codepoint: String,
    /// Display name, typically the official Unicode name.
    pub name: String,
    /// Pin order; `Some` means pinned. Lower orders are shown first.
    pub pin: Option<u32>,
    /// Usage history; `None` for characters that were never inserted.
    pub usage: Option<UsageInfo>,
}

impl Character {
    /// An unpinned, untracked character.
    pub fn new(codepoint: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            codepoint: codepoint.into(),
            name: name.into(),
            pin: None,
            usage: None,
        }
    }

    /// Builder: pin the character with the given order.
    #[must_use]
    pub fn with_pin(mut self, order: u32) -> Self {
        self.pin = Some(order);
        self
    }

    /// Builder: attach a usage record.
    #[must_use]
    pub fn with_usage(mut self, last_used: Option<DateTime<Utc>>, use_count: u32) -> Self {
        self.usage = Some(UsageInfo {
            last_used,
            use_count,
        });
        self
    }

    /// Whether the character is pinned.
    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    /// Whether the character carries a usage record.
    pub fn is_usage_tracked(&self) -> bool {
        self.usage.is_some()
    }

    /// Last insertion timestamp, if any.
    pub fn last_used(&self) -> Option<DateTime<Utc>> {
        self.usage.as_ref().and_then(|usage| usage.last_used)
    }

    /// Number of recorded insertions; `0` for untracked characters.
    pub fn use_count(&self) -> u32 {
        self.usage.as_ref().map_or(0, |usage| usage.use_count)
    }

    /// Hexadecimal rendering of the codepoint used for codepoint search.
    ///
    /// Every scalar is printed as uppercase hex padded to four digits;
    /// multi-scalar sequences are space-separated.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicode_search::Character;
    ///
    /// assert_eq!(Character::new("★", "Star").hexadecimal(), "2605");
    /// assert_eq!(Character::new("A", "Latin Capital Letter A").hexadecimal(), "0041");
    /// assert_eq!(Character::new("🇸🇰", "Flag: Slovakia").hexadecimal(), "1F1F8 1F1F0");
    /// ```
    pub fn hexadecimal(&self) -> String {
        self.codepoint
            .chars()
            .map(|c| format!("{:04X}", u32::from(c)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Persisted shape of a [`Character`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterRecord {
    #[serde(alias = "char")]
    codepoint: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pin: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    use_count: Option<u32>,
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        let use_count = record.use_count.unwrap_or(0);
        let usage = (record.last_used.is_some() || use_count > 0).then(|| UsageInfo {
            last_used: record.last_used.as_deref().and_then(parse_timestamp),
            use_count,
        });

        Self {
            codepoint: record.codepoint,
            name: record.name,
            pin: record.pin,
            usage,
        }
    }
}

impl From<Character> for CharacterRecord {
    fn from(character: Character) -> Self {
        let (last_used, use_count) = match character.usage {
            Some(usage) => (
                usage
                    .last_used
                    .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
                Some(usage.use_count),
            ),
            None => (None, None),
        };

        Self {
            codepoint: character.codepoint,
            name: character.name,
            pin: character.pin,
            last_used,
            use_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn untracked_record_has_no_usage() {
        let c: Character = serde_json::from_str(r#"{"codepoint":"☂","name":"Umbrella"}"#).unwrap();
        assert!(!c.is_usage_tracked());
        assert!(!c.is_pinned());
        assert_eq!(c.use_count(), 0);
        assert_eq!(c.last_used(), None);
    }

    #[test]
    fn tracked_record_parses_timestamp() {
        let c: Character = serde_json::from_str(
            r#"{"char":"★","name":"Star","pin":2,"lastUsed":"2024-01-09T00:00:00Z","useCount":1}"#,
        )
        .unwrap();
        assert_eq!(c.codepoint, "★");
        assert_eq!(c.pin, Some(2));
        assert_eq!(
            c.last_used(),
            Some(Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap())
        );
        assert_eq!(c.use_count(), 1);
    }

    #[test]
    fn malformed_timestamp_keeps_character_tracked() {
        let c: Character = serde_json::from_str(
            r#"{"codepoint":"☕","name":"Hot Beverage","lastUsed":"Invalid Date","useCount":10}"#,
        )
        .unwrap();
        assert!(c.is_usage_tracked());
        assert_eq!(c.last_used(), None);
        assert_eq!(c.use_count(), 10);
    }

    #[test]
    fn zero_use_count_without_timestamp_is_untracked() {
        let c: Character =
            serde_json::from_str(r#"{"codepoint":"☂","name":"Umbrella","useCount":0}"#).unwrap();
        assert!(!c.is_usage_tracked());
    }

    #[test]
    fn serializes_camel_case_record() {
        let at = Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap();
        let c = Character::new("★", "Star").with_usage(Some(at), 3);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["codepoint"], "★");
        assert_eq!(json["lastUsed"], "2024-01-09T00:00:00.000Z");
        assert_eq!(json["useCount"], 3);
        assert!(json.get("pin").is_none());
    }

    #[test]
    fn record_round_trip_preserves_character() {
        let at = Utc.with_ymd_and_hms(2024, 1, 9, 12, 30, 0).unwrap();
        let c = Character::new("☕", "Hot Beverage")
            .with_pin(0)
            .with_usage(Some(at), 10);
        let back: Character = serde_json::from_str(&serde_json::to_string(&c).unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn hexadecimal_pads_to_four_digits() {
        assert_eq!(Character::new("\u{3B1}", "Greek Small Letter Alpha").hexadecimal(), "03B1");
    }
}
