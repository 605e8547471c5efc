#![warn(missing_docs)]

//! Ranked Unicode character search.
//!
//! `unicode_search` ranks a catalog of characters against a query typed
//! into a search box. Every character is matched twice, once by name and once
//! by its hexadecimal codepoint, using an 8-tier [`Ranking`]. Matches are then
//! ordered by pins, match quality, a recent/frequent usage boost and the
//! usage history itself, with the character name as the final tiebreaker.
//!
//! An empty query is browse mode: nothing is filtered and the order comes
//! from pins and usage alone.

/// Total-order helpers for optional values, numbers and timestamps.
pub mod order;

/// Ranking algorithm for scoring how well a text matches a query.
pub mod ranking;

/// Catalog entries and their usage history.
pub mod character;

/// Usage-history comparators and session usage thresholds.
pub mod usage;

/// Configuration options for matching and ranking.
pub mod options;

/// Matching a catalog against a query.
pub mod search;

/// The composite comparator that orders search results.
pub mod sort;

/// Compute-once async cache.
pub mod cache;

/// Crate error type.
pub mod error;

/// The catalog, usage and pin store collaborator.
pub mod service;

/// Remote character metadata lookup.
pub mod remote;

/// Per-modal search session.
pub mod session;

/// Tracing subscriber setup.
pub mod logging;

// Re-export primary public API types and functions at the crate root.
pub use cache::ReadCache;
pub use character::{Character, UsageInfo};
pub use error::{Error, Result};
pub use options::SearchOptions;
pub use ranking::{PreparedQuery, Ranking, TextMatch, get_match_ranking, match_text};
pub use remote::{CharacterInfo, RemoteOptions, UnicodeTableClient};
pub use search::{CharacterMatch, FieldMatch, fill_null_character_match_scores, search_characters};
pub use service::{CharacterService, MemoryCharacterService};
pub use session::{PinCandidates, SearchSession, UsageBadges};
pub use sort::{compare_character_matches, rank_and_order};
pub use usage::{
    UsageDisplayStatistics, compare_characters, compare_unicode_names,
    compare_usage_tracked_characters,
};
