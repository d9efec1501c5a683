//! Test fixtures and data generators
//!
//! Taxonomy tables in the CSV layout the index reads.

use anyhow::Result;
use cladis_core::TaxonId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Test taxon row
#[derive(Debug, Clone, PartialEq)]
pub struct TestTaxon {
    pub taxon_id: TaxonId,
    pub parent_taxon_id: Option<TaxonId>,
    pub name: String,
    pub rank: Option<String>,
    pub leaf_class_id: Option<u32>,
    pub score: Option<f64>,
}

impl TestTaxon {
    pub fn new(taxon_id: u32, parent: Option<u32>, name: impl Into<String>) -> Self {
        Self {
            taxon_id: TaxonId(taxon_id),
            parent_taxon_id: parent.map(TaxonId),
            name: name.into(),
            rank: None,
            leaf_class_id: None,
            score: None,
        }
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    pub fn with_leaf_class(mut self, leaf_class_id: u32) -> Self {
        self.leaf_class_id = Some(leaf_class_id);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    fn to_csv_row(&self) -> String {
        let opt = |v: Option<String>| v.unwrap_or_default();
        format!(
            "{},{},{},{},{},{}\n",
            self.taxon_id,
            opt(self.parent_taxon_id.map(|p| p.to_string())),
            self.name,
            opt(self.rank.clone()),
            opt(self.leaf_class_id.map(|c| c.to_string())),
            opt(self.score.map(|s| s.to_string())),
        )
    }
}

/// Render rows as a taxonomy CSV
pub fn taxonomy_csv(taxa: &[TestTaxon]) -> String {
    let mut out =
        String::from("taxon_id,parent_taxon_id,name,rank,leaf_class_id,aggregated_combined_score\n");
    for taxon in taxa {
        out.push_str(&taxon.to_csv_row());
    }
    out
}

/// Render `(taxon_id, thres)` pairs as a thresholds CSV
pub fn thresholds_csv(rows: &[(u32, f64)]) -> String {
    let mut out = String::from("taxon_id,thres\n");
    for (taxon_id, thres) in rows {
        writeln!(&mut out, "{},{}", taxon_id, thres).unwrap();
    }
    out
}

pub fn write_taxonomy_csv(dir: &Path, name: &str, taxa: &[TestTaxon]) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, taxonomy_csv(taxa))?;
    Ok(path)
}

pub fn write_thresholds_csv(dir: &Path, name: &str, rows: &[(u32, f64)]) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, thresholds_csv(rows))?;
    Ok(path)
}

/// Two root-level taxa: R1 (leaf class 0) and R2, whose only child R3 is
/// leaf class 1
pub fn three_taxon_scenario() -> Vec<TestTaxon> {
    use taxa::*;
    vec![
        TestTaxon::new(R1.0, None, "R1").with_leaf_class(0),
        TestTaxon::new(R2.0, None, "R2"),
        TestTaxon::new(R3.0, Some(R2.0), "R3").with_leaf_class(1),
    ]
}

/// Ids used by [`three_taxon_scenario`]
pub mod taxa {
    use cladis_core::TaxonId;

    pub const R1: TaxonId = TaxonId(1);
    pub const R2: TaxonId = TaxonId(2);
    pub const R3: TaxonId = TaxonId(3);
}

/// Random acyclic forest of `count` taxa, rows shuffled.
///
/// Every childless taxon gets a leaf class; classes are dense and assigned in
/// row order. Ids start at 1000 so they never look like output positions.
pub fn random_forest(count: usize, seed: u64) -> Vec<TestTaxon> {
    let mut rng = StdRng::seed_from_u64(seed);
    let ids: Vec<u32> = (0..count as u32).map(|i| 1000 + i).collect();

    let mut taxa: Vec<TestTaxon> = ids
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            // Parents are always earlier in generation order, so no cycles
            let parent = if i == 0 || rng.gen_bool(0.15) {
                None
            } else {
                Some(ids[rng.gen_range(0..i)])
            };
            TestTaxon::new(id, parent, format!("taxon_{}", id))
        })
        .collect();

    taxa.shuffle(&mut rng);

    let parents: std::collections::HashSet<TaxonId> =
        taxa.iter().filter_map(|t| t.parent_taxon_id).collect();
    let mut next_class = 0;
    for taxon in taxa.iter_mut() {
        if !parents.contains(&taxon.taxon_id) {
            taxon.leaf_class_id = Some(next_class);
            next_class += 1;
        }
    }

    taxa
}
