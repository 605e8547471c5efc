//! Remote character metadata lookup.
//!
//! Queries the unicode-table.com search endpoint for extra character
//! information. The lookup is an optional enrichment: every failure
//! (transport error, timeout, non-200 status, malformed body) is logged and
//! reported as an empty result, never as an error.
//!
//! Wire shape:
//!
//! - request: `POST <base>/a-search`, form body `s=<query>`
//! - response: `{ "result": { "c": [[code, description], ...] } }`
//!
//! Rows whose code or description is missing or `null` are dropped.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::character::Character;
use crate::error::{Error, Result};

/// Base URL of the public lookup service.
pub const DEFAULT_BASE_URL: &str = "https://unicode-table.com/en/";

/// Connection settings for [`UnicodeTableClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteOptions {
    /// Service base URL; `a-search` is appended.
    pub base_url: String,
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Value of the `accept-language` header.
    pub accept_language: String,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: 1000,
            accept_language: "en-US,en;q=0.9".to_owned(),
        }
    }
}

/// One row of a remote lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInfo {
    /// The character as returned by the service.
    pub code: String,
    /// Human-readable description.
    pub description: String,
}

impl From<CharacterInfo> for Character {
    fn from(info: CharacterInfo) -> Self {
        Character::new(info.code, info.description)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    c: Option<Vec<Vec<Value>>>,
}

#[derive(Debug, Error)]
enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Client for the remote lookup endpoint.
#[derive(Debug, Clone)]
pub struct UnicodeTableClient {
    http: reqwest::Client,
    endpoint: String,
}

impl UnicodeTableClient {
    /// Build a client from `options`.
    ///
    /// Fails only if the underlying HTTP client cannot be constructed
    /// (for example an invalid `accept_language` header value).
    pub fn new(options: &RemoteOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&options.accept_language)
                .map_err(|e| Error::Config(format!("accept-language: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(options.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/a-search", options.base_url.trim_end_matches('/')),
        })
    }

    /// Search the remote catalog. Never fails; errors yield an empty list.
    pub async fn search(&self, query: &str) -> Vec<CharacterInfo> {
        match self.try_search(query).await {
            Ok(rows) => {
                debug!(query, rows = rows.len(), "remote character lookup");
                rows
            }
            Err(err) => {
                warn!(query, error = %err, "remote character lookup failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> std::result::Result<Vec<CharacterInfo>, LookupError> {
        let response = self
            .http
            .post(&self.endpoint)
            .form(&[("s", query)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(LookupError::Status(response.status()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(rows_from_response(body))
    }
}

/// Keep rows whose code and description are both present and non-null.
fn rows_from_response(response: SearchResponse) -> Vec<CharacterInfo> {
    let Some(rows) = response.result.and_then(|result| result.c) else {
        return Vec::new();
    };

    rows.into_iter()
        .filter_map(|row| {
            Some(CharacterInfo {
                code: cell_text(row.first()?)?,
                description: cell_text(row.get(1)?)?,
            })
        })
        .collect()
}

/// Text of one row cell; `None` for `null`.
fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
