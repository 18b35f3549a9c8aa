//! Catalog harvest pipeline.
//!
//! This module provides the [`Harvester`] coordinator that walks the
//! paginated listings of every [`EntryKind`] and caches each entry page:
//! - Fetching through any [`PageSource`] (HTTP in production)
//! - Strictly sequential requests, listing order preserved
//! - Structured logging via `tracing`
//! - Atomic page writes, so an aborted run never leaves a truncated file

use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};
use url::Url;

use crate::harvest::listing;
use crate::harvest::traits::HarvestError;
use crate::model::EntryKind;
use crate::output::write_atomic;
use crate::traits::PageSource;

/// Catalog root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://www.participatedb.com/";

// ============================================================================
// Statistics
// ============================================================================

/// Per-category outcome of a harvest.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CategoryStats {
    /// Category directory name (`projects`, `references`, `tools`)
    pub category: String,

    /// Listing pages that yielded at least one entry
    pub listing_pages: u32,

    /// Entry paths discovered across all listing pages
    pub discovered: usize,

    /// Entry pages written to disk
    pub written: usize,

    /// Time spent on this category (milliseconds)
    pub duration_ms: u64,
}

/// Complete harvest statistics.
#[derive(Debug, Default, Clone, Serialize)]
pub struct HarvestStats {
    /// One entry per category, in harvest order
    pub categories: Vec<CategoryStats>,

    /// Total time spent on the whole harvest (milliseconds)
    pub total_duration_ms: u64,
}

impl HarvestStats {
    /// Pages written for `kind`, zero if the category was not harvested.
    pub fn written(&self, kind: EntryKind) -> usize {
        self.categories
            .iter()
            .find(|c| c.category == kind.dir_name())
            .map_or(0, |c| c.written)
    }
}

// ============================================================================
// Harvester
// ============================================================================

/// Crawls the catalog listings and caches every entry page as raw HTML.
///
/// Output layout: `{output_dir}/{projects|references|tools}/{id}.html`.
///
/// # Example
///
/// ```ignore
/// use catalog_harvester::harvest::{Harvester, HttpSource};
/// use catalog_harvester::model::EntryKind;
/// use std::path::Path;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let harvester = Harvester::new(HttpSource::new()?)
///         .with_base_url("http://www.participatedb.com/");
///     let stats = harvester.execute(Path::new("pages")).await?;
///     println!("{} projects", stats.written(EntryKind::Project));
///     Ok(())
/// }
/// ```
pub struct Harvester<S: PageSource> {
    /// Where pages come from
    source: S,

    /// Catalog root every listing and entry path is resolved against
    base_url: String,
}

impl<S: PageSource> Harvester<S> {
    /// Creates a harvester for [`DEFAULT_BASE_URL`].
    pub fn new(source: S) -> Self {
        Self {
            source,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets the catalog root URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Harvests every category into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError`] on the first fetch failure, malformed listing
    /// or filesystem error. Pages written before the failure stay on disk.
    pub async fn execute(&self, output_dir: &Path) -> Result<HarvestStats, HarvestError> {
        let start = Instant::now();
        let base = Url::parse(&self.base_url).map_err(|source| HarvestError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })?;

        info!(
            base_url = %base,
            source = self.source.source_id(),
            output = %output_dir.display(),
            "Starting harvest"
        );

        let mut stats = HarvestStats::default();
        for kind in EntryKind::ALL {
            stats
                .categories
                .push(self.harvest_category(&base, kind, output_dir).await?);
        }

        stats.total_duration_ms = start.elapsed().as_millis() as u64;
        info!(duration_ms = stats.total_duration_ms, "Harvest completed");
        Ok(stats)
    }

    #[instrument(skip(self, base, output_dir), fields(category = kind.dir_name()))]
    async fn harvest_category(
        &self,
        base: &Url,
        kind: EntryKind,
        output_dir: &Path,
    ) -> Result<CategoryStats, HarvestError> {
        let start = Instant::now();
        let mut stats = CategoryStats {
            category: kind.dir_name().to_string(),
            ..CategoryStats::default()
        };

        let entries = self.discover(base, kind, &mut stats).await?;
        stats.discovered = entries.len();
        info!("{} {} found", entries.len(), kind.dir_name());

        let category_dir = output_dir.join(kind.dir_name());
        std::fs::create_dir_all(&category_dir)?;

        for (id, path) in &entries {
            let url = resolve(base, path)?;
            // Cached verbatim; decoding is the extractor's job.
            let body = self.source.fetch(url.as_str()).await?;
            write_atomic(&category_dir.join(format!("{id}.html")), &body)?;
            stats.written += 1;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            written = stats.written,
            duration_ms = stats.duration_ms,
            "Category cached"
        );
        Ok(stats)
    }

    /// Walks `?page=1, 2, ...` until a page has no entries.
    ///
    /// Returns `(id, path)` pairs in listing order.
    async fn discover(
        &self,
        base: &Url,
        kind: EntryKind,
        stats: &mut CategoryStats,
    ) -> Result<Vec<(u32, String)>, HarvestError> {
        let mut entries = Vec::new();
        let mut page = 1u32;
        loop {
            let url = resolve(base, &format!("/{}/?page={page}", kind.dir_name()))?;
            let body = self.source.fetch(url.as_str()).await?;
            let malformed = |reason: String| HarvestError::MalformedListing { kind, page, reason };

            let html = std::str::from_utf8(&body)
                .map_err(|e| malformed(format!("not valid UTF-8: {e}")))?;
            let found = listing::entry_paths(html).map_err(malformed)?;
            if found.is_empty() {
                break;
            }

            debug!(page, entries = found.len(), "Listing page read");
            stats.listing_pages += 1;
            for path in found {
                let id = listing::entry_id(&path).ok_or_else(|| {
                    malformed(format!("entry path '{path}' does not end in a numeric ID"))
                })?;
                entries.push((id, path));
            }
            page += 1;
        }
        Ok(entries)
    }
}

fn resolve(base: &Url, path: &str) -> Result<Url, HarvestError> {
    base.join(path).map_err(|source| HarvestError::InvalidUrl {
        url: path.to_string(),
        source,
    })
}

// ============================================================================
// Tests
// ============================================================================
