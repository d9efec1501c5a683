//! The built taxonomy as the prediction layer sees it.
//!
//! [`ModelTaxonomy::build`] runs the whole startup sequence: bounds and
//! ancestor chains, the leaf class map, then the threshold join. Once it
//! returns the value is never mutated, so it can be shared across request
//! threads behind an `Arc` without locking.

use crate::filter::PredictionFilter;
use crate::taxonomy::{
    render_tree, AncestryIndex, HierarchyBuilder, LeafClassMap, TaxonRecord, TaxonTable,
    ThresholdTable, TreeOptions,
};
use cladis_core::{CladisResult, LookupError, TaxonId};
use std::path::Path;
use tracing::{debug, info, info_span};

#[derive(Debug, Clone)]
pub struct ModelTaxonomy {
    table: TaxonTable,
    ancestry: AncestryIndex,
    leaf_classes: LeafClassMap,
    thresholds: ThresholdTable,
}

impl ModelTaxonomy {
    pub fn build(table: TaxonTable, thresholds: Option<ThresholdTable>) -> CladisResult<Self> {
        let span = info_span!("taxonomy_build", taxa = table.len());
        let _guard = span.enter();

        let ancestry = HierarchyBuilder::new(&table).build()?;
        debug!("Hierarchy built, max depth {}", ancestry.max_depth());

        let leaf_classes = LeafClassMap::from_table(&table)?;
        debug!(
            "Mapped {} leaf classes over {} output positions",
            leaf_classes.len(),
            leaf_classes.width()
        );

        let thresholds = thresholds
            .map(|t| t.join(|taxon| ancestry.contains(taxon)))
            .unwrap_or_default();

        info!(
            "Taxonomy ready: {} taxa, {} root-level, {} leaf classes, {} thresholds, max depth {}",
            table.len(),
            ancestry.root_children().len(),
            leaf_classes.len(),
            thresholds.len(),
            ancestry.max_depth()
        );

        Ok(Self {
            table,
            ancestry,
            leaf_classes,
            thresholds,
        })
    }

    /// Read the taxonomy CSV and, when given, the thresholds CSV, then build
    pub fn load<P: AsRef<Path>>(taxonomy_path: P, thresholds_path: Option<&Path>) -> CladisResult<Self> {
        let table = TaxonTable::from_path(taxonomy_path)?;
        let thresholds = thresholds_path.map(ThresholdTable::from_path).transpose()?;
        Self::build(table, thresholds)
    }

    pub fn taxon(&self, taxon_id: TaxonId) -> Result<&TaxonRecord, LookupError> {
        self.table
            .get(taxon_id)
            .ok_or(LookupError::UnknownTaxon(taxon_id))
    }

    /// Taxon scored at `position` of the model output
    pub fn taxon_for_class(&self, position: usize) -> Result<&TaxonRecord, LookupError> {
        let taxon_id = self
            .leaf_classes
            .taxon_for_class(position)
            .ok_or(LookupError::UnknownLeafClass(position))?;
        self.taxon(taxon_id)
    }

    pub fn table(&self) -> &TaxonTable {
        &self.table
    }

    pub fn ancestry(&self) -> &AncestryIndex {
        &self.ancestry
    }

    pub fn leaf_classes(&self) -> &LeafClassMap {
        &self.leaf_classes
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn threshold_for(&self, taxon_id: TaxonId) -> Option<f64> {
        self.thresholds.threshold_for(taxon_id)
    }

    pub fn filter(&self) -> PredictionFilter<'_> {
        PredictionFilter::new(&self.ancestry, &self.leaf_classes)
    }

    /// Leaf taxa in ascending output position
    pub fn leaf_taxa(&self) -> impl Iterator<Item = &TaxonRecord> + '_ {
        self.leaf_classes
            .iter()
            .filter_map(move |(_, taxon_id)| self.table.get(taxon_id))
    }

    pub fn render_tree(
        &self,
        root: Option<TaxonId>,
        options: &TreeOptions,
    ) -> Result<String, LookupError> {
        render_tree(&self.table, &self.ancestry, root, options)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cladis_core::{CladisError, LeafClassId, TaxonomyBuildError};

    fn scenario_table() -> TaxonTable {
        TaxonTable::from_records(vec![
            TaxonRecord::new(1, None, "R1").with_leaf_class(0),
            TaxonRecord::new(2, None, "R2"),
            TaxonRecord::new(3, Some(2), "R3").with_leaf_class(1),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_and_query() {
        let thresholds =
            ThresholdTable::from_pairs([(TaxonId(2), 0.3), (TaxonId(3), 0.6)]).unwrap();
        let model = ModelTaxonomy::build(scenario_table(), Some(thresholds)).unwrap();

        assert_eq!(model.len(), 3);
        assert!(model.ancestry().is_or_descendant_of(TaxonId(3), TaxonId(2)).unwrap());
        assert!(!model.ancestry().is_or_descendant_of(TaxonId(1), TaxonId(2)).unwrap());
        assert_eq!(model.threshold_for(TaxonId(1)), None);
        assert_eq!(model.threshold_for(TaxonId(3)), Some(0.6));
        assert_eq!(model.taxon_for_class(1).unwrap().name, "R3");
        assert_eq!(
            model.taxon_for_class(5).unwrap_err(),
            LookupError::UnknownLeafClass(5)
        );
    }

    #[test]
    fn test_leaf_taxa_in_class_order() {
        let table = TaxonTable::from_records(vec![
            TaxonRecord::new(1, None, "Top"),
            TaxonRecord::new(2, Some(1), "B").with_leaf_class(1),
            TaxonRecord::new(3, Some(1), "A").with_leaf_class(0),
        ])
        .unwrap();
        let model = ModelTaxonomy::build(table, None).unwrap();

        let names: Vec<&str> = model.leaf_taxa().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(model.leaf_classes().class_for_taxon(TaxonId(2)), Some(LeafClassId(1)));
    }

    #[test]
    fn test_duplicate_leaf_class_fails_build() {
        let table = TaxonTable::from_records(vec![
            TaxonRecord::new(1, None, "A").with_leaf_class(0),
            TaxonRecord::new(2, None, "B").with_leaf_class(0),
        ])
        .unwrap();

        assert!(matches!(
            ModelTaxonomy::build(table, None),
            Err(CladisError::Build(TaxonomyBuildError::DuplicateLeafClass { .. }))
        ));
    }

    #[test]
    fn test_thresholds_for_unknown_taxa_are_dropped() {
        let thresholds =
            ThresholdTable::from_pairs([(TaxonId(1), 0.3), (TaxonId(500), 0.6)]).unwrap();
        let model = ModelTaxonomy::build(scenario_table(), Some(thresholds)).unwrap();

        assert_eq!(model.thresholds().len(), 1);
        assert_eq!(model.threshold_for(TaxonId(500)), None);
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModelTaxonomy>();
    }
}
