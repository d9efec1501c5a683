//! Taxonomy build and lookup error types

use crate::types::{LeafClassId, TaxonId};
use thiserror::Error;

/// Fatal problems found while building the taxonomy index.
///
/// Any of these means the input tables are inconsistent and the process must
/// not start serving predictions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyBuildError {
    #[error("row {row}: taxon id 0 is reserved for the implicit root")]
    ReservedTaxonId { row: usize },

    #[error("taxon {taxon} appears more than once in the taxonomy table")]
    DuplicateTaxon { taxon: TaxonId },

    #[error("taxon {taxon} references parent {parent}, which is not in the taxonomy table")]
    DanglingParent { taxon: TaxonId, parent: TaxonId },

    #[error("cyclic parentage between taxa {}", format_members(.members))]
    Cycle { members: Vec<TaxonId> },

    #[error("leaf class {leaf_class} is assigned to both taxon {first} and taxon {second}")]
    DuplicateLeafClass {
        leaf_class: LeafClassId,
        first: TaxonId,
        second: TaxonId,
    },

    #[error("taxon {taxon} has more than one threshold row")]
    DuplicateThreshold { taxon: TaxonId },
}

fn format_members(members: &[TaxonId]) -> String {
    members
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A query named something the index does not know about.
///
/// Recoverable: request layers surface it as invalid input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown taxon {0}")]
    UnknownTaxon(TaxonId),

    #[error("unknown leaf class {0}")]
    UnknownLeafClass(usize),
}

impl LookupError {
    pub fn is_invalid_input(&self) -> bool {
        true
    }
}
