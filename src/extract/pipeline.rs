//! Cached-page to YAML conversion.
//!
//! [`Extractor`] reads `{pages}/{category}/{id}.html` and writes
//! `{yaml}/{category}/{slug}.yaml`, one record at a time. A record is
//! fully parsed and rendered before its file is touched.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::extract::entry::parse_entry;
use crate::extract::error::ExtractError;
use crate::extract::slug::slugify;
use crate::model::{Entry, EntryKind};
use crate::output::write_atomic;

// ============================================================================
// Statistics
// ============================================================================

/// Per-category outcome of an extraction run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ExtractCategoryStats {
    /// Category directory name
    pub category: String,

    /// Whether the category directory was absent from the pages tree
    pub skipped: bool,

    /// HTML pages read
    pub pages: usize,

    /// YAML files written; slug collisions count once per write
    pub written: usize,
}

/// Complete extraction statistics.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ExtractStats {
    pub categories: Vec<ExtractCategoryStats>,

    /// Total time spent (milliseconds)
    pub total_duration_ms: u64,
}

impl ExtractStats {
    /// Records written for `kind`.
    pub fn written(&self, kind: EntryKind) -> usize {
        self.categories
            .iter()
            .find(|c| c.category == kind.dir_name())
            .map_or(0, |c| c.written)
    }
}

/// A parsed record with its output name and YAML text.
#[derive(Debug, Clone)]
pub struct RenderedEntry {
    pub entry: Entry,
    pub slug: String,
    pub yaml: String,
}

/// Parses and renders one cached page without touching the filesystem.
///
/// # Errors
///
/// Returns [`ExtractError::Structure`] for unexpected markup,
/// [`ExtractError::EmptySlug`] for an unusable name.
pub fn render_entry(kind: EntryKind, id: u32, html: &str) -> Result<RenderedEntry, ExtractError> {
    let entry = parse_entry(kind, id, html)?;

    let slug = slugify(&entry.name);
    if slug.is_empty() {
        return Err(ExtractError::EmptySlug {
            kind,
            id,
            name: entry.name,
        });
    }

    let yaml = entry
        .to_yaml()
        .map_err(|source| ExtractError::Yaml { kind, id, source })?;

    Ok(RenderedEntry { entry, slug, yaml })
}

// ============================================================================
// Extractor
// ============================================================================

/// Converts a harvested pages tree into a YAML tree.
pub struct Extractor {
    /// Root of the harvested `{category}/{id}.html` tree
    pages_dir: PathBuf,

    /// Root of the `{category}/{slug}.yaml` output tree
    yaml_dir: PathBuf,
}

impl Extractor {
    pub fn new(pages_dir: impl Into<PathBuf>, yaml_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            yaml_dir: yaml_dir.into(),
        }
    }

    /// Converts every category present under the pages directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] on the first malformed page or filesystem
    /// error. Records already written stay on disk; the failing entry gets
    /// no file.
    pub fn execute(&self) -> Result<ExtractStats, ExtractError> {
        let start = Instant::now();
        if !self.pages_dir.is_dir() {
            return Err(ExtractError::MissingInput(self.pages_dir.clone()));
        }

        info!(
            pages = %self.pages_dir.display(),
            output = %self.yaml_dir.display(),
            "Starting extraction"
        );

        let mut stats = ExtractStats::default();
        for kind in EntryKind::ALL {
            stats.categories.push(self.extract_category(kind)?);
        }

        stats.total_duration_ms = start.elapsed().as_millis() as u64;
        info!(duration_ms = stats.total_duration_ms, "Extraction completed");
        Ok(stats)
    }

    #[instrument(skip(self), fields(category = kind.dir_name()))]
    fn extract_category(&self, kind: EntryKind) -> Result<ExtractCategoryStats, ExtractError> {
        let mut stats = ExtractCategoryStats {
            category: kind.dir_name().to_string(),
            ..ExtractCategoryStats::default()
        };

        let source_dir = self.pages_dir.join(kind.dir_name());
        if !source_dir.is_dir() {
            warn!(dir = %source_dir.display(), "Category directory missing, skipping");
            stats.skipped = true;
            return Ok(stats);
        }

        let target_dir = self.yaml_dir.join(kind.dir_name());
        std::fs::create_dir_all(&target_dir)?;

        for (id, path) in cached_pages(&source_dir)? {
            let html = std::fs::read_to_string(&path)?;
            stats.pages += 1;

            let rendered = render_entry(kind, id, &html)?;
            let target = target_dir.join(format!("{}.yaml", rendered.slug));
            if target.exists() {
                debug!(id, slug = %rendered.slug, "Overwriting existing record");
            }
            write_atomic(&target, rendered.yaml.as_bytes())?;
            stats.written += 1;
        }

        info!(
            pages = stats.pages,
            written = stats.written,
            "Category converted"
        );
        Ok(stats)
    }
}

/// `{id}.html` files of a category directory, in ascending ID order.
fn cached_pages(dir: &Path) -> Result<Vec<(u32, PathBuf)>, ExtractError> {
    let mut pages = Vec::new();
    for dir_entry in std::fs::read_dir(dir)? {
        let path = dir_entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
            continue;
        }
        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<u32>().ok())
            .ok_or_else(|| ExtractError::InvalidFileName(path.clone()))?;
        pages.push((id, path));
    }
    pages.sort_by_key(|(id, _)| *id);
    Ok(pages)
}

// ============================================================================
// Tests
// ============================================================================
