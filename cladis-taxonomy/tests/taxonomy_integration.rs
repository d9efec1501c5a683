/// Integration tests: building the index from CSV files on disk
use cladis_core::{CladisError, TaxonId, TaxonomyBuildError};
use cladis_taxonomy::{ModelTaxonomy, NestedBounds, TaxonomyGate};
use cladis_test::fixtures::taxa::{R1, R2, R3};
use cladis_test::{three_taxon_scenario, write_taxonomy_csv, write_thresholds_csv, TestTaxon};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use tempfile::TempDir;

fn load_scenario(dir: &TempDir, thresholds: Option<&[(u32, f64)]>) -> ModelTaxonomy {
    let taxonomy = write_taxonomy_csv(dir.path(), "taxonomy.csv", &three_taxon_scenario()).unwrap();
    let thresholds = thresholds
        .map(|rows| write_thresholds_csv(dir.path(), "thresholds.csv", rows).unwrap());
    ModelTaxonomy::load(&taxonomy, thresholds.as_deref()).unwrap()
}

#[test]
fn test_three_taxon_scenario() {
    let dir = TempDir::new().unwrap();
    let model = load_scenario(&dir, None);
    let ancestry = model.ancestry();

    assert_eq!(ancestry.bounds(R1).unwrap(), NestedBounds::new(0, 1));
    assert_eq!(ancestry.bounds(R2).unwrap(), NestedBounds::new(2, 5));
    assert_eq!(ancestry.bounds(R3).unwrap(), NestedBounds::new(3, 4));

    assert!(ancestry.is_or_descendant_of(R3, R2).unwrap());
    assert!(!ancestry.is_or_descendant_of(R1, R2).unwrap());

    let filtered = model.filter().apply(&[0.9, 0.4], Some(R2)).unwrap();
    assert_eq!(filtered, HashMap::from([(R3, 0.4)]));
}

#[test]
fn test_threshold_absent_is_not_zero() {
    cladis_test::init_test_logging();
    let dir = TempDir::new().unwrap();
    let model = load_scenario(&dir, Some(&[(2, 0.0), (3, 0.42), (99, 0.5)]));

    assert_eq!(model.threshold_for(R1), None);
    assert_eq!(model.threshold_for(R2), Some(0.0));
    assert_eq!(model.threshold_for(R3), Some(0.42));

    // Rows for taxa outside the taxonomy are dropped by the join
    assert_eq!(model.threshold_for(TaxonId(99)), None);
    assert_eq!(model.thresholds().len(), 2);
}

#[test]
fn test_two_node_cycle_fails_load() {
    let dir = TempDir::new().unwrap();
    let path = write_taxonomy_csv(
        dir.path(),
        "cycle.csv",
        &[
            TestTaxon::new(10, Some(11), "A").with_leaf_class(0),
            TestTaxon::new(11, Some(10), "B"),
        ],
    )
    .unwrap();

    match ModelTaxonomy::load(&path, None).unwrap_err() {
        CladisError::Build(TaxonomyBuildError::Cycle { members }) => {
            assert_eq!(members, vec![TaxonId(10), TaxonId(11)]);
        }
        other => panic!("Expected cycle error, got {:?}", other),
    }
}

#[test]
fn test_dangling_parent_fails_load() {
    let dir = TempDir::new().unwrap();
    let path = write_taxonomy_csv(
        dir.path(),
        "dangling.csv",
        &[
            TestTaxon::new(1, None, "Life"),
            TestTaxon::new(2, Some(77), "Lost"),
        ],
    )
    .unwrap();

    assert!(matches!(
        ModelTaxonomy::load(&path, None),
        Err(CladisError::Build(TaxonomyBuildError::DanglingParent { .. }))
    ));
}

#[test]
fn test_missing_taxonomy_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        ModelTaxonomy::load(dir.path().join("absent.csv"), None),
        Err(CladisError::Io(_))
    ));
}

#[test]
fn test_gate_serves_only_after_load() {
    let dir = TempDir::new().unwrap();
    let path = write_taxonomy_csv(dir.path(), "taxonomy.csv", &three_taxon_scenario()).unwrap();

    let gate = TaxonomyGate::new();
    assert!(matches!(gate.get(), Err(CladisError::NotReady)));

    gate.initialize_with(|| ModelTaxonomy::load(&path, None)).unwrap();
    let model = gate.get().unwrap();
    assert_eq!(model.ancestry().ancestors_of(R3).unwrap(), &[R2]);
}

#[test]
fn test_tree_rendering_from_disk() {
    let dir = TempDir::new().unwrap();
    let model = load_scenario(&dir, None);

    let rendered = model
        .render_tree(None, &cladis_taxonomy::TreeOptions {
            order: cladis_core::TreeOrder::Source,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(rendered, "├── R1 :: 0:1\n└── R2 :: 2:5\n    └── R3 :: 3:4\n");
}
