//! Property-based tests for resolution and layout.
//!
//! Generates random catalogs (cycles allowed) and checks the structural
//! invariants every resolved, laid-out tree must satisfy.

use std::collections::HashSet;
use std::num::NonZeroU64;

use endfield_planner::{Catalog, Node, NodeSource, Recipe, plan};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

const ITEMS: usize = 6;

fn item(i: usize) -> String {
    format!("Item{}", i)
}

fn arb_recipe() -> impl Strategy<Value = Recipe> {
    (
        0..20u64,
        proptest::collection::vec((0..ITEMS, 1..5u64), 0..3),
        1..4u64,
    )
        .prop_map(|(time, inputs, output_count)| Recipe {
            machine: format!("M{}", time % 3),
            time,
            inputs: inputs.into_iter().map(|(i, c)| (item(i), c)).collect(),
            output_count,
        })
}

/// Up to two recipes for each of a random subset of items.
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    proptest::collection::vec(
        (0..ITEMS, proptest::collection::vec(arb_recipe(), 1..3)),
        0..ITEMS,
    )
    .prop_map(|entries| {
        let mut catalog = Catalog::new();
        for (i, recipes) in entries {
            for recipe in recipes {
                catalog.insert(item(i), recipe);
            }
        }
        catalog
    })
}

// ===========================================================================
// Invariant checks
// ===========================================================================

fn check_node(node: &Node, catalog: &Catalog, level: usize, ancestors: &mut Vec<String>) {
    assert!(node.amount >= 1);
    assert_eq!(node.level, level);

    match &node.recipe {
        Some(recipe) => {
            assert_eq!(node.source, NodeSource::Recipe);
            assert_eq!(Some(recipe), catalog.recipes_for(&node.name).first());
            assert_eq!(node.batches, node.amount.div_ceil(recipe.output_count));
            assert_eq!(node.children.len(), recipe.inputs.len());
            assert!(!ancestors.contains(&node.name));

            for (child, (name, per_batch)) in node.children.iter().zip(&recipe.inputs) {
                assert_eq!(&child.name, name);
                assert_eq!(child.amount, per_batch * node.batches);
            }

            let slowest = node.children.iter().map(|c| c.total_time).max().unwrap_or(0);
            assert_eq!(node.total_time, recipe.time * node.batches + slowest);
        }
        None => {
            assert_eq!(node.batches, 1);
            assert_eq!(node.total_time, 0);
            assert!(node.children.is_empty());
            match node.source {
                NodeSource::CycleTruncated => assert!(ancestors.contains(&node.name)),
                NodeSource::Unresolved => assert!(!catalog.contains(&node.name)),
                NodeSource::DepthLimited => panic!("shallow catalog hit the depth limit"),
                NodeSource::Recipe => panic!("recipe source without recipe"),
            }
        }
    }

    if !node.children.is_empty() {
        let min = node.children.iter().map(|c| c.position_x).fold(f64::INFINITY, f64::min);
        let max = node.children.iter().map(|c| c.position_x).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(node.position_x, (min + max) / 2.0);
    }

    ancestors.push(node.name.clone());
    for child in &node.children {
        check_node(child, catalog, level + 1, ancestors);
    }
    ancestors.pop();
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn resolved_trees_hold_invariants(
        catalog in arb_catalog(),
        target in 0..ITEMS,
        quantity in 1..=100u64,
    ) {
        let root = plan(&catalog, &item(target), NonZeroU64::new(quantity).unwrap());

        prop_assert_eq!(root.amount, quantity);
        check_node(&root, &catalog, 0, &mut Vec::new());
    }

    #[test]
    fn leaves_get_consecutive_unique_slots(
        catalog in arb_catalog(),
        target in 0..ITEMS,
    ) {
        let root = plan(&catalog, &item(target), NonZeroU64::new(1).unwrap());

        let slots: Vec<f64> = root.iter().filter(|n| n.is_leaf()).map(|n| n.position_x).collect();
        let expected: Vec<f64> = (0..slots.len()).map(|i| i as f64).collect();
        prop_assert_eq!(&slots, &expected);

        let unique: HashSet<u64> = slots.iter().map(|x| x.to_bits()).collect();
        prop_assert_eq!(unique.len(), slots.len());
    }
}
