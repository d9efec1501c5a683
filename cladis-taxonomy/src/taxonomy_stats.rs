use crate::model::ModelTaxonomy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shape of a built taxonomy, for startup logs and the `check` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomySummary {
    pub taxa: usize,
    pub root_level_taxa: usize,
    /// Taxa with at least one child
    pub internal_taxa: usize,
    pub leaf_classes: usize,
    /// Score vector length the leaf class map covers
    pub output_width: usize,
    pub thresholds: usize,
    pub max_depth: usize,
    /// Taxa per rank; taxa without a rank are counted under "unranked"
    pub rank_counts: BTreeMap<String, usize>,
}

impl TaxonomySummary {
    pub fn from_model(model: &ModelTaxonomy) -> Self {
        let ancestry = model.ancestry();

        let mut rank_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut internal_taxa = 0;
        for record in model.table().iter() {
            let rank = record.rank.clone().unwrap_or_else(|| "unranked".to_string());
            *rank_counts.entry(rank).or_insert(0) += 1;

            if ancestry
                .bounds(record.taxon_id)
                .map(|b| !b.is_leaf())
                .unwrap_or(false)
            {
                internal_taxa += 1;
            }
        }

        Self {
            taxa: model.len(),
            root_level_taxa: ancestry.root_children().len(),
            internal_taxa,
            leaf_classes: model.leaf_classes().len(),
            output_width: model.leaf_classes().width(),
            thresholds: model.thresholds().len(),
            max_depth: ancestry.max_depth(),
            rank_counts,
        }
    }
}
