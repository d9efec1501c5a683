/// Bidirectional map between model output positions and taxon ids
use super::table::TaxonTable;
use cladis_core::{LeafClassId, TaxonId, TaxonomyBuildError};
use std::collections::HashMap;

/// Slack allowed on top of twice the leaf count before the dense layout is
/// abandoned
const DENSE_SLACK: usize = 1024;

#[derive(Debug, Clone)]
enum Positions {
    /// Indexed by output position; `None` marks an unused slot
    Dense(Vec<Option<TaxonId>>),
    /// Sorted by position, for widths far beyond the number of leaves
    Sparse(Vec<(LeafClassId, TaxonId)>),
}

#[derive(Debug, Clone)]
pub struct LeafClassMap {
    positions: Positions,
    by_taxon: HashMap<TaxonId, LeafClassId>,
    width: usize,
}

impl Default for LeafClassMap {
    fn default() -> Self {
        Self {
            positions: Positions::Dense(Vec::new()),
            by_taxon: HashMap::new(),
            width: 0,
        }
    }
}

impl LeafClassMap {
    /// Collect every taxon carrying a leaf class id. Two taxa claiming the
    /// same output position abort the build.
    pub fn from_table(table: &TaxonTable) -> Result<Self, TaxonomyBuildError> {
        let mut owners: HashMap<LeafClassId, TaxonId> = HashMap::new();
        let mut by_taxon = HashMap::new();

        for record in table.iter() {
            let Some(leaf_class) = record.leaf_class_id else {
                continue;
            };
            if let Some(&first) = owners.get(&leaf_class) {
                return Err(TaxonomyBuildError::DuplicateLeafClass {
                    leaf_class,
                    first,
                    second: record.taxon_id,
                });
            }
            owners.insert(leaf_class, record.taxon_id);
            by_taxon.insert(record.taxon_id, leaf_class);
        }

        let width = owners.keys().map(|c| c.index() + 1).max().unwrap_or(0);

        let positions = if width <= owners.len().saturating_mul(2) + DENSE_SLACK {
            let mut dense = vec![None; width];
            for (class, taxon) in owners {
                dense[class.index()] = Some(taxon);
            }
            Positions::Dense(dense)
        } else {
            let mut sparse: Vec<(LeafClassId, TaxonId)> = owners.into_iter().collect();
            sparse.sort_unstable_by_key(|&(class, _)| class);
            Positions::Sparse(sparse)
        };

        Ok(Self {
            positions,
            by_taxon,
            width,
        })
    }

    /// Taxon scored at `position` of the model output, if any
    #[inline]
    pub fn taxon_for_class(&self, position: usize) -> Option<TaxonId> {
        match &self.positions {
            Positions::Dense(dense) => dense.get(position).copied().flatten(),
            Positions::Sparse(sparse) => sparse
                .binary_search_by_key(&position, |&(class, _)| class.index())
                .ok()
                .map(|i| sparse[i].1),
        }
    }

    /// Output position of a leaf taxon; `None` for internal taxa
    pub fn class_for_taxon(&self, taxon_id: TaxonId) -> Option<LeafClassId> {
        self.by_taxon.get(&taxon_id).copied()
    }

    /// Number of taxa with an output position
    pub fn len(&self) -> usize {
        self.by_taxon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_taxon.is_empty()
    }

    /// Highest leaf class id + 1, the score vector length the map covers
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mapped (position, taxon) pairs in ascending position order
    pub fn iter(&self) -> Box<dyn Iterator<Item = (LeafClassId, TaxonId)> + '_> {
        match &self.positions {
            Positions::Dense(dense) => Box::new(
                dense
                    .iter()
                    .enumerate()
                    .filter_map(|(pos, taxon)| taxon.map(|t| (LeafClassId(pos as u32), t))),
            ),
            Positions::Sparse(sparse) => Box::new(sparse.iter().copied()),
        }
    }
}
