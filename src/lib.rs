pub mod cli;
pub mod extract;
pub mod harvest;
pub mod html;
pub mod model;
pub mod output;
pub mod traits;

// Re-export common types for convenience
pub use extract::{ExtractError, ExtractStats, Extractor, StructureError};
pub use harvest::{HarvestError, HarvestStats, Harvester, HttpSource};
pub use model::*;
pub use traits::*;
