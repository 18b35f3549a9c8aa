//! Extract module - converts cached entry pages into YAML records.
//!
//! - **Parsing**: markup-driven record building via [`entry::parse_entry`]
//! - **Sections**: the closed set of bottom-block titles, [`Section`]
//! - **Slugs**: output file names via [`slugify`]
//! - **Pipeline**: directory-tree conversion via [`Extractor`]
//! - **Errors**: [`StructureError`] for markup, [`ExtractError`] for the run

pub mod entry;
pub mod error;
pub mod pipeline;
pub mod section;
pub mod slug;

pub use entry::parse_entry;
pub use error::{ExtractError, StructureError};
pub use pipeline::{render_entry, ExtractCategoryStats, ExtractStats, Extractor, RenderedEntry};
pub use section::Section;
pub use slug::slugify;
