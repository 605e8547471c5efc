//! Error type for the collaborator-facing parts of the crate.
//!
//! The ranking pipeline itself is infallible; errors only come from loading
//! a catalog and from mutating usage or pin state.

use thiserror::Error;

/// Errors raised by [`CharacterService`](crate::service::CharacterService)
/// implementations and catalog loading.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog document could not be parsed.
    #[error("Catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Reading the catalog failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A codepoint that is not part of the catalog was referenced.
    #[error("Unknown character: {0:?}")]
    UnknownCharacter(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A specialized `Result` for this crate.
pub type Result<T> = std::result::Result<T, Error>;
