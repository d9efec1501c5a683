//! Taxonomy index for species-identification model outputs
//!
//! Builds a nested-set hierarchy from a flat taxon table, answers
//! ancestor/descendant questions in constant time and translates between
//! model output positions and taxon ids.

pub mod filter;
pub mod gate;
pub mod model;
pub mod taxonomy;
pub mod taxonomy_stats;

// Re-export commonly used types
pub use filter::{read_score_vector, top_k, PredictionFilter};
pub use gate::TaxonomyGate;
pub use model::ModelTaxonomy;
pub use taxonomy::{
    AncestryIndex, HierarchyBuilder, LeafClassMap, NestedBounds, TaxonRecord, TaxonTable,
    ThresholdTable, TreeOptions,
};
pub use taxonomy_stats::TaxonomySummary;
