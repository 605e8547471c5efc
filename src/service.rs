//! The character catalog collaborator.
//!
//! [`CharacterService`] is the seam between the ranking core and whatever
//! stores the catalog, the usage history and the pins. The core only reads
//! through it (`get_all`, `get_used`) and reports selections
//! (`record_usage`). [`MemoryCharacterService`] keeps everything in memory
//! and is what the binary and the tests use.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::character::{Character, UsageInfo};
use crate::error::{Error, Result};

/// Catalog provider, usage recorder and pin store.
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// The full catalog. Order is irrelevant; the ranking engine reorders.
    async fn get_all(&self) -> Result<Vec<Character>>;

    /// The subset of the catalog with usage history attached.
    async fn get_used(&self) -> Result<Vec<Character>>;

    /// Record one insertion of `codepoint` now.
    async fn record_usage(&self, codepoint: &str) -> Result<()>;

    /// Pin `codepoint` so it is always listed first.
    async fn pin(&self, codepoint: &str) -> Result<()>;

    /// Remove the pin from `codepoint`.
    async fn unpin(&self, codepoint: &str) -> Result<()>;
}

/// In-memory [`CharacterService`].
#[derive(Debug, Default)]
pub struct MemoryCharacterService {
    characters: RwLock<Vec<Character>>,
}

impl MemoryCharacterService {
    /// Wrap an already-loaded catalog.
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            characters: RwLock::new(characters),
        }
    }

    /// Load a catalog from a JSON array of character records.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicode_search::MemoryCharacterService;
    ///
    /// let service = MemoryCharacterService::from_json(
    ///     r#"[{"codepoint": "★", "name": "Star", "useCount": 1, "lastUsed": "2024-01-09T00:00:00Z"}]"#,
    /// )
    /// .unwrap();
    /// # let _ = service;
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let characters: Vec<Character> = serde_json::from_str(json)?;
        Ok(Self::new(characters))
    }

    /// Load a catalog from a JSON file.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let service = Self::from_json(&json)?;
        debug!(path = %path.display(), "loaded character catalog");
        Ok(service)
    }

    /// Serialize the current catalog, including usage and pins.
    pub async fn to_json(&self) -> Result<String> {
        let characters = self.characters.read().await;
        Ok(serde_json::to_string_pretty(&*characters)?)
    }

    /// Record one insertion of `codepoint` at `at`.
    pub async fn record_usage_at(&self, codepoint: &str, at: DateTime<Utc>) -> Result<()> {
        self.update(codepoint, |character| {
            let use_count = character.use_count().saturating_add(1);
            character.usage = Some(UsageInfo {
                last_used: Some(at),
                use_count,
            });
            debug!(codepoint, use_count, "recorded character usage");
        })
        .await
    }

    async fn update<F>(&self, codepoint: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Character) + Send,
    {
        let mut characters = self.characters.write().await;
        let character = characters
            .iter_mut()
            .find(|c| c.codepoint == codepoint)
            .ok_or_else(|| Error::UnknownCharacter(codepoint.to_owned()))?;
        apply(character);
        Ok(())
    }
}

#[async_trait]
impl CharacterService for MemoryCharacterService {
    async fn get_all(&self) -> Result<Vec<Character>> {
        Ok(self.characters.read().await.clone())
    }

    async fn get_used(&self) -> Result<Vec<Character>> {
        let characters = self.characters.read().await;
        Ok(characters
            .iter()
            .filter(|c| c.is_usage_tracked())
            .cloned()
            .collect())
    }

    async fn record_usage(&self, codepoint: &str) -> Result<()> {
        self.record_usage_at(codepoint, Utc::now()).await
    }

    async fn pin(&self, codepoint: &str) -> Result<()> {
        // The next order is read and assigned under one write guard.
        let mut characters = self.characters.write().await;
        let next_order = characters
            .iter()
            .filter_map(|c| c.pin)
            .max()
            .map_or(0, |max| max.saturating_add(1));

        let character = characters
            .iter_mut()
            .find(|c| c.codepoint == codepoint)
            .ok_or_else(|| Error::UnknownCharacter(codepoint.to_owned()))?;
        if character.pin.is_none() {
            character.pin = Some(next_order);
            debug!(codepoint, order = next_order, "pinned character");
        }
        Ok(())
    }

    async fn unpin(&self, codepoint: &str) -> Result<()> {
        self.update(codepoint, |character| {
            character.pin = None;
            debug!(codepoint, "unpinned character");
        })
        .await
    }
}
