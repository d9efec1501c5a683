//! Prediction filter: turns a dense model score vector into taxon scores,
//! optionally restricted to one clade.

use crate::taxonomy::{AncestryIndex, LeafClassMap};
use cladis_core::{CladisError, CladisResult, LookupError, TaxonId};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct PredictionFilter<'a> {
    ancestry: &'a AncestryIndex,
    leaf_classes: &'a LeafClassMap,
}

impl<'a> PredictionFilter<'a> {
    pub fn new(ancestry: &'a AncestryIndex, leaf_classes: &'a LeafClassMap) -> Self {
        Self {
            ancestry,
            leaf_classes,
        }
    }

    /// Map every scored position to its taxon. With `filter_taxon` set, only
    /// taxa that are the filter taxon or lie beneath it are kept.
    ///
    /// Positions without a mapped taxon are skipped. An unknown filter taxon is
    /// an error rather than a silently unfiltered result.
    pub fn apply(
        &self,
        scores: &[f32],
        filter_taxon: Option<TaxonId>,
    ) -> Result<HashMap<TaxonId, f32>, LookupError> {
        let clade = match filter_taxon {
            Some(id) => Some((id, self.ancestry.bounds(id)?)),
            None => None,
        };

        let mut results = HashMap::new();
        for (position, &score) in scores.iter().enumerate() {
            let Some(taxon) = self.leaf_classes.taxon_for_class(position) else {
                continue;
            };
            if let Some((filter_id, filter_bounds)) = clade {
                if taxon != filter_id
                    && !filter_bounds.contains_strictly(&self.ancestry.bounds(taxon)?)
                {
                    continue;
                }
            }
            results.insert(taxon, score);
        }
        Ok(results)
    }

    /// [`apply`](Self::apply) over many score vectors in parallel
    pub fn apply_batch(
        &self,
        batch: &[Vec<f32>],
        filter_taxon: Option<TaxonId>,
    ) -> Result<Vec<HashMap<TaxonId, f32>>, LookupError> {
        batch
            .par_iter()
            .map(|scores| self.apply(scores, filter_taxon))
            .collect()
    }
}

/// Highest `k` scores, ties broken by ascending taxon id
pub fn top_k(results: &HashMap<TaxonId, f32>, k: usize) -> Vec<(TaxonId, f32)> {
    let mut ranked: Vec<(TaxonId, f32)> = results.iter().map(|(&t, &s)| (t, s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

/// Load a score vector stored as a JSON array of numbers
pub fn read_score_vector<P: AsRef<Path>>(path: P) -> CladisResult<Vec<f32>> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        CladisError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.as_ref().display(), e),
        ))
    })?;
    let scores: Vec<f32> = serde_json::from_str(&contents).map_err(|e| {
        CladisError::Parse(format!(
            "{}: expected a JSON array of scores: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    Ok(scores)
}
