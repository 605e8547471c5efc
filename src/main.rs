//! Command-line front end for ranked Unicode character search.
//!
//! Loads a JSON catalog, runs one search session and prints the ranked
//! suggestions as tab-separated rows: character, name, codepoint, badges.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use unicode_search::{
    Error, MemoryCharacterService, RemoteOptions, Result, SearchOptions, SearchSession,
    UnicodeTableClient, logging,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON catalog of characters (array of records); required unless `--remote`
    #[arg(short, long, required_unless_present = "remote")]
    catalog: Option<PathBuf>,

    /// Maximum number of rows to print
    #[arg(short, long, default_value_t = 20)]
    limit: usize,

    /// Compare names with diacritics preserved
    #[arg(long)]
    keep_diacritics: bool,

    /// Query the remote lookup service instead of the catalog
    #[arg(long)]
    remote: bool,

    /// Search query; omit to browse
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let query = args.query.unwrap_or_default();

    if args.remote {
        let client = UnicodeTableClient::new(&RemoteOptions::default())?;
        for row in client.search(&query).await.into_iter().take(args.limit) {
            println!("{}\t{}", row.code, row.description);
        }
        return Ok(());
    }

    let Some(catalog) = args.catalog else {
        return Err(Error::Config("--catalog is required for local search".to_owned()));
    };
    let service = Arc::new(MemoryCharacterService::from_path(&catalog).await?);
    let options = SearchOptions {
        keep_diacritics: args.keep_diacritics,
        ..SearchOptions::default()
    };
    let session = SearchSession::new(service, options);
    info!(placeholder = %session.placeholder().await?, "session opened");

    let suggestions = session.suggestions(&query).await?;
    for suggestion in suggestions.iter().take(args.limit) {
        let character = &suggestion.character;
        let badges = session.badges(character).await?;
        let mut labels = Vec::new();
        if badges.recent {
            labels.push("recent");
        }
        if badges.frequent {
            labels.push("frequent");
        }
        println!(
            "{}\t{}\t{}\t{}",
            character.codepoint,
            character.name,
            character.hexadecimal(),
            labels.join(",")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_lookup_needs_no_catalog() {
        let args = Args::try_parse_from(["unicode-search", "--remote", "star"]).unwrap();
        assert!(args.remote);
        assert_eq!(args.catalog, None);
        assert_eq!(args.query.as_deref(), Some("star"));
    }

    #[test]
    fn local_search_requires_catalog() {
        assert!(Args::try_parse_from(["unicode-search", "star"]).is_err());

        let args = Args::try_parse_from(["unicode-search", "--catalog", "chars.json"]).unwrap();
        assert_eq!(args.catalog, Some(PathBuf::from("chars.json")));
        assert_eq!(args.query, None);
    }
}
