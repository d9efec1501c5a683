/// Core types shared across all Cladis crates
pub mod taxonomy;

pub use taxonomy::{LeafClassId, TaxonId};
