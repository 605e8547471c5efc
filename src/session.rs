//! One search session: the state behind a single open of the search modal.
//!
//! A [`SearchSession`] ties a [`CharacterService`] to the ranking pipeline.
//! Usage statistics are computed on first use and cached for the lifetime of
//! the session, so every keystroke ranks against the same thresholds even if
//! a selection is recorded in between.

use std::sync::Arc;

use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::ReadCache;
use crate::character::Character;
use crate::error::Result;
use crate::options::SearchOptions;
use crate::search::{CharacterMatch, search_characters};
use crate::service::CharacterService;
use crate::usage::{UsageDisplayStatistics, most_recently_used, often_used};

const PLACEHOLDER_PREFIX: &str = "Unicode search";

/// Badges shown next to a suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageBadges {
    /// Used at or after the recency cutoff.
    pub recent: bool,
    /// Used at least as often as the average.
    pub frequent: bool,
}

/// Characters offered for pinning in the settings panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PinCandidates {
    /// Tracked characters, most recently used first.
    pub recently_used: Vec<Character>,
    /// Tracked characters used strictly more often than the average.
    pub often_used: Vec<Character>,
}

/// Search state for one modal open.
pub struct SearchSession {
    service: Arc<dyn CharacterService>,
    options: SearchOptions,
    statistics: ReadCache<UsageDisplayStatistics>,
}

impl SearchSession {
    /// Open a session over `service`.
    ///
    /// Nothing is loaded until the first query.
    pub fn new(service: Arc<dyn CharacterService>, options: SearchOptions) -> Self {
        let recent_rank = options.recent_rank;
        let loader_service = Arc::clone(&service);
        let statistics = ReadCache::new(move || {
            let service = Arc::clone(&loader_service);
            async move {
                let used = service.get_used().await?;
                let statistics = UsageDisplayStatistics::from_used(&used, recent_rank);
                debug!(
                    used = used.len(),
                    cutoff = %statistics.top_third_recently_used,
                    average = statistics.average_use_count,
                    "computed usage statistics"
                );
                Ok(statistics)
            }
        });

        Self {
            service,
            options,
            statistics,
        }
    }

    /// Session usage thresholds, loaded on first call.
    pub async fn usage_statistics(&self) -> Result<UsageDisplayStatistics> {
        self.statistics.get_value().await.copied()
    }

    /// Ranked suggestions for `query`. An empty query lists the whole catalog.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying [`CharacterService`].
    pub async fn suggestions(&self, query: &str) -> Result<Vec<CharacterMatch>> {
        let characters = self.service.get_all().await?;
        let statistics = self.usage_statistics().await?;
        let total = characters.len();

        let matches = search_characters(characters, query, &statistics, &self.options);
        debug!(query, total, matched = matches.len(), "ranked suggestions");
        Ok(matches)
    }

    /// Recent/frequent badges for `character` under this session's thresholds.
    pub async fn badges(&self, character: &Character) -> Result<UsageBadges> {
        let statistics = self.usage_statistics().await?;
        Ok(UsageBadges {
            recent: statistics.is_recent(character),
            frequent: statistics.is_frequent(character),
        })
    }

    /// Record the selection of `selected` and return the text to insert.
    ///
    /// A failure to record usage never blocks the insertion; it is logged.
    pub async fn choose(&self, selected: &CharacterMatch) -> String {
        let codepoint = &selected.character.codepoint;
        if let Err(err) = self.service.record_usage(codepoint).await {
            warn!(codepoint = %codepoint, error = %err, "failed to record character usage");
        }
        codepoint.clone()
    }

    /// Input placeholder naming a random catalog character.
    pub async fn placeholder(&self) -> Result<String> {
        let characters = self.service.get_all().await?;
        Ok(match characters.choose(&mut rand::rng()) {
            Some(character) => format!("{PLACEHOLDER_PREFIX}: {}", character.name),
            None => PLACEHOLDER_PREFIX.to_owned(),
        })
    }

    /// Lists for the pin settings panel.
    pub async fn pin_candidates(&self) -> Result<PinCandidates> {
        let used = self.service.get_used().await?;
        let statistics = self.usage_statistics().await?;

        Ok(PinCandidates {
            recently_used: most_recently_used(&used).into_iter().cloned().collect(),
            often_used: often_used(&used, statistics.average_use_count)
                .into_iter()
                .cloned()
                .collect(),
        })
    }
}
