//! Error types for the harvest stage.

use crate::model::EntryKind;
use crate::traits::FetchError;
use thiserror::Error;

/// Errors that can occur while crawling listings and caching entry pages.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Fetching a listing or entry page failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Base URL or entry path could not be turned into an absolute URL
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A listing page did not have the expected shape
    #[error("Malformed {kind} listing on page {page}: {reason}")]
    MalformedListing {
        kind: EntryKind,
        page: u32,
        reason: String,
    },

    /// Writing a cached page failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
