//! Read-only ancestry queries over nested-interval bounds.
//!
//! Every taxon carries a `[left, right]` interval assigned by one depth-first
//! walk. A strictly contains B exactly when A is a strict ancestor of B, so
//! relationship checks compare four integers and never walk the tree.

use cladis_core::{LookupError, TaxonId};
use std::collections::HashMap;

/// Nested-set interval of a single taxon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NestedBounds {
    pub left: u32,
    pub right: u32,
}

impl NestedBounds {
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    /// True when `other` lies strictly inside this interval
    #[inline]
    pub fn contains_strictly(&self, other: &NestedBounds) -> bool {
        self.left < other.left && other.right < self.right
    }

    /// No descendants
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.right == self.left + 1
    }

    pub fn descendant_count(&self) -> usize {
        ((self.right - self.left - 1) / 2) as usize
    }
}

/// Ancestor/descendant index produced by the hierarchy builder.
///
/// All per-taxon data lives in parallel vectors addressed by the taxon's
/// slot (its row in the taxonomy table).
#[derive(Debug, Clone, Default)]
pub struct AncestryIndex {
    slots: HashMap<TaxonId, usize>,
    ids: Vec<TaxonId>,
    bounds: Vec<NestedBounds>,
    ancestors: Vec<Vec<TaxonId>>,
    children: Vec<Vec<TaxonId>>,
    root_children: Vec<TaxonId>,
}

impl AncestryIndex {
    pub(crate) fn from_parts(
        slots: HashMap<TaxonId, usize>,
        ids: Vec<TaxonId>,
        bounds: Vec<NestedBounds>,
        ancestors: Vec<Vec<TaxonId>>,
        children: Vec<Vec<TaxonId>>,
        root_children: Vec<TaxonId>,
    ) -> Self {
        debug_assert_eq!(ids.len(), bounds.len());
        debug_assert_eq!(ids.len(), ancestors.len());
        debug_assert_eq!(ids.len(), children.len());
        Self {
            slots,
            ids,
            bounds,
            ancestors,
            children,
            root_children,
        }
    }

    #[inline]
    fn slot(&self, taxon_id: TaxonId) -> Result<usize, LookupError> {
        self.slots
            .get(&taxon_id)
            .copied()
            .ok_or(LookupError::UnknownTaxon(taxon_id))
    }

    pub fn contains(&self, taxon_id: TaxonId) -> bool {
        self.slots.contains_key(&taxon_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Taxon ids in taxonomy table order
    pub fn ids(&self) -> &[TaxonId] {
        &self.ids
    }

    #[inline]
    pub fn bounds(&self, taxon_id: TaxonId) -> Result<NestedBounds, LookupError> {
        Ok(self.bounds[self.slot(taxon_id)?])
    }

    /// True iff `ancestor` lies on the path from the root to `descendant`,
    /// excluding `descendant` itself
    pub fn is_strict_ancestor(
        &self,
        ancestor: TaxonId,
        descendant: TaxonId,
    ) -> Result<bool, LookupError> {
        let outer = self.bounds(ancestor)?;
        let inner = self.bounds(descendant)?;
        Ok(outer.contains_strictly(&inner))
    }

    /// True iff `candidate` is `filter` or sits anywhere below it
    pub fn is_or_descendant_of(
        &self,
        candidate: TaxonId,
        filter: TaxonId,
    ) -> Result<bool, LookupError> {
        let inner = self.bounds(candidate)?;
        if candidate == filter {
            return Ok(true);
        }
        let outer = self.bounds(filter)?;
        Ok(outer.contains_strictly(&inner))
    }

    /// Ancestor chain ordered from the top of the forest down to the parent
    pub fn ancestors_of(&self, taxon_id: TaxonId) -> Result<&[TaxonId], LookupError> {
        Ok(&self.ancestors[self.slot(taxon_id)?])
    }

    /// Immediate children in table order; `TaxonId::ROOT` lists root-level taxa
    pub fn children_of(&self, taxon_id: TaxonId) -> Result<&[TaxonId], LookupError> {
        if taxon_id.is_root() {
            return Ok(&self.root_children);
        }
        Ok(&self.children[self.slot(taxon_id)?])
    }

    pub fn root_children(&self) -> &[TaxonId] {
        &self.root_children
    }

    pub fn parent_of(&self, taxon_id: TaxonId) -> Result<TaxonId, LookupError> {
        Ok(self
            .ancestors_of(taxon_id)?
            .last()
            .copied()
            .unwrap_or(TaxonId::ROOT))
    }

    /// Number of ancestors between the taxon and the implicit root
    pub fn depth(&self, taxon_id: TaxonId) -> Result<usize, LookupError> {
        Ok(self.ancestors_of(taxon_id)?.len())
    }

    pub fn max_depth(&self) -> usize {
        self.ancestors.iter().map(Vec::len).max().unwrap_or(0)
    }
}
