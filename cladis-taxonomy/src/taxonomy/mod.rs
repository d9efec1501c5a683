pub mod ancestry;
pub mod builder;
pub mod formatter;
pub mod leaf_class;
pub mod table;
pub mod thresholds;

// Re-export commonly used types
pub use ancestry::{AncestryIndex, NestedBounds};
pub use builder::HierarchyBuilder;
pub use formatter::{
    render_tree, render_tree_with, StandardTaxonFormatter, TaxonFormatter, TreeOptions,
};
pub use leaf_class::LeafClassMap;
pub use table::{TaxonRecord, TaxonTable};
pub use thresholds::ThresholdTable;
