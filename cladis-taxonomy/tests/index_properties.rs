/// Property tests over randomly generated forests
use cladis_core::TaxonId;
use cladis_taxonomy::{ModelTaxonomy, TaxonTable};
use cladis_test::{random_forest, taxonomy_csv};
use proptest::prelude::*;

fn build(count: usize, seed: u64) -> ModelTaxonomy {
    let csv = taxonomy_csv(&random_forest(count, seed));
    let table = TaxonTable::from_reader(csv.as_bytes()).unwrap();
    ModelTaxonomy::build(table, None).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bounds_are_well_formed(count in 1usize..120, seed in any::<u64>()) {
        let model = build(count, seed);
        let ancestry = model.ancestry();

        for &id in ancestry.ids() {
            let bounds = ancestry.bounds(id).unwrap();
            prop_assert!(bounds.left < bounds.right);
            if ancestry.children_of(id).unwrap().is_empty() {
                prop_assert_eq!(bounds.right, bounds.left + 1);
            }
        }
    }

    #[test]
    fn containment_matches_stored_chains(count in 1usize..60, seed in any::<u64>()) {
        let model = build(count, seed);
        let ancestry = model.ancestry();

        for &a in ancestry.ids() {
            prop_assert!(ancestry.is_or_descendant_of(a, a).unwrap());
            for &b in ancestry.ids() {
                let by_bounds = ancestry.is_strict_ancestor(a, b).unwrap();
                let by_chain = ancestry.ancestors_of(b).unwrap().contains(&a);
                prop_assert_eq!(by_bounds, by_chain);
            }
        }
    }

    #[test]
    fn siblings_never_overlap(count in 2usize..120, seed in any::<u64>()) {
        let model = build(count, seed);
        let ancestry = model.ancestry();

        let mut parents = vec![TaxonId::ROOT];
        parents.extend_from_slice(ancestry.ids());
        for parent in parents {
            let children = ancestry.children_of(parent).unwrap();
            for (i, &s1) in children.iter().enumerate() {
                for &s2 in &children[i + 1..] {
                    let (b1, b2) = (ancestry.bounds(s1).unwrap(), ancestry.bounds(s2).unwrap());
                    prop_assert!(b1.right < b2.left || b2.right < b1.left);
                }
            }
        }
    }

    #[test]
    fn leaf_class_round_trip(count in 1usize..120, seed in any::<u64>()) {
        let model = build(count, seed);
        let leaves = model.leaf_classes();

        for record in model.table().iter() {
            if let Some(class) = leaves.class_for_taxon(record.taxon_id) {
                prop_assert_eq!(leaves.taxon_for_class(class.index()), Some(record.taxon_id));
            }
        }
    }

    #[test]
    fn filter_by_childless_taxon_keeps_at_most_itself(count in 1usize..80, seed in any::<u64>()) {
        let model = build(count, seed);
        let scores: Vec<f32> = (0..model.leaf_classes().width()).map(|i| i as f32).collect();

        for &id in model.ancestry().ids() {
            if !model.ancestry().bounds(id).unwrap().is_leaf() {
                continue;
            }
            let kept = model.filter().apply(&scores, Some(id)).unwrap();
            prop_assert!(kept.len() <= 1);
            if let Some(class) = model.leaf_classes().class_for_taxon(id) {
                prop_assert_eq!(kept.get(&id).copied(), Some(class.index() as f32));
            }
        }
    }

    #[test]
    fn filtered_results_are_descendants(count in 1usize..80, seed in any::<u64>()) {
        let model = build(count, seed);
        let scores = vec![0.5f32; model.leaf_classes().width()];
        let ancestry = model.ancestry();

        for &filter in ancestry.ids() {
            let kept = model.filter().apply(&scores, Some(filter)).unwrap();
            for taxon in kept.keys() {
                prop_assert!(ancestry.is_or_descendant_of(*taxon, filter).unwrap());
            }
            let expected = model
                .leaf_classes()
                .iter()
                .filter(|(_, t)| ancestry.is_or_descendant_of(*t, filter).unwrap())
                .count();
            prop_assert_eq!(kept.len(), expected);
        }
    }
}
