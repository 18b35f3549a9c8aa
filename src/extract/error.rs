//! Error types for the extraction stage.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::EntryKind;

/// An entry page that does not have the markup shape the extractor expects.
///
/// Always fatal: the extractor never skips or repairs a page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected markup in {kind} {id}: {expectation}")]
pub struct StructureError {
    pub kind: EntryKind,
    pub id: u32,
    /// What the page was expected to contain
    pub expectation: String,
}

/// Errors that can occur while converting cached pages to YAML.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Page markup did not match the expected layout
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// Pages directory does not exist
    #[error("Pages directory not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Cached page name is not `{numeric-id}.html`
    #[error("Invalid page file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    /// Entry name has no characters usable in a file name
    #[error("Name {name:?} of {kind} {id} yields an empty slug")]
    EmptySlug {
        kind: EntryKind,
        id: u32,
        name: String,
    },

    /// Record could not be rendered as YAML
    #[error("Failed to serialize {kind} {id}: {source}")]
    Yaml {
        kind: EntryKind,
        id: u32,
        #[source]
        source: serde_yaml::Error,
    },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
