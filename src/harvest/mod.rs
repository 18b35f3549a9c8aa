//! Harvest module - crawls the catalog listings and caches entry pages.
//!
//! This module provides the first of the two stages:
//! - **Listing**: anchor discovery on paginated listing pages via [`listing`]
//! - **Sources**: the [`HttpSource`] implementation of [`PageSource`](crate::traits::PageSource)
//! - **Pipeline**: sequential crawl-and-cache via [`Harvester`]
//! - **Errors**: [`HarvestError`]

pub mod http;
pub mod listing;
pub mod pipeline;
pub mod traits;

pub use http::HttpSource;
pub use pipeline::{CategoryStats, HarvestStats, Harvester, DEFAULT_BASE_URL};
pub use traits::HarvestError;
