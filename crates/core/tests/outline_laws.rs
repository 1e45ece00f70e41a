use proptest::prelude::*;
use tocline_core::{FlatHeading, HeadingNode, anchor_ids, build_tree, filter_by_level_range, flatten};

/// Documents with an optional leading title followed by section headings.
fn headings() -> impl Strategy<Value = Vec<FlatHeading>> {
    (any::<bool>(), prop::collection::vec(2u8..=6, 0..40)).prop_map(|(titled, levels)| {
        titled
            .then_some(1u8)
            .into_iter()
            .chain(levels)
            .enumerate()
            .map(|(i, level)| FlatHeading::new(format!("h{i}"), level, format!("Heading {i}")))
            .collect()
    })
}

fn every_child_is_deeper(nodes: &[HeadingNode]) -> bool {
    nodes.iter().all(|node| {
        node.children.iter().all(|child| child.level > node.level)
            && every_child_is_deeper(&node.children)
    })
}

proptest! {
    #[test]
    fn pre_order_reproduces_input_order(flat in headings()) {
        let tree = build_tree(&flat);
        let ids: Vec<String> = flat.iter().map(|h| h.id.clone()).collect();
        prop_assert_eq!(anchor_ids(&tree), ids);
    }

    #[test]
    fn children_are_strictly_deeper(flat in headings()) {
        prop_assert!(every_child_is_deeper(&build_tree(&flat)));
    }

    #[test]
    fn full_range_filter_is_identity(flat in headings()) {
        let tree = build_tree(&flat);
        prop_assert_eq!(filter_by_level_range(tree.clone(), 1, 6), tree);
    }

    #[test]
    fn filter_is_idempotent(flat in headings(), min in 1u8..=6, span in 0u8..=5) {
        let max = min.saturating_add(span).min(6);
        let once = filter_by_level_range(build_tree(&flat), min, max);
        let twice = filter_by_level_range(once.clone(), min, max);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_keeps_exactly_the_window_in_order(flat in headings(), min in 1u8..=6, span in 0u8..=5) {
        let max = min.saturating_add(span).min(6);
        let filtered = filter_by_level_range(build_tree(&flat), min, max);
        let kept: Vec<&str> = flatten(&filtered).iter().map(|n| n.id.as_str()).collect();
        let expected: Vec<&str> = flat
            .iter()
            .filter(|h| (min..=max).contains(&h.level))
            .map(|h| h.id.as_str())
            .collect();
        prop_assert_eq!(kept, expected);
    }
}

#[test]
fn worked_example_nests_and_filters() {
    let flat = vec![
        FlatHeading::new("a", 2, "A"),
        FlatHeading::new("b", 3, "B"),
        FlatHeading::new("c", 2, "C"),
        FlatHeading::new("d", 4, "D"),
    ];
    let tree = build_tree(&flat);
    assert_eq!(tree.len(), 2);
    assert_eq!(anchor_ids(&tree[0].children), vec!["b"]);
    assert_eq!(anchor_ids(&tree[1].children), vec!["d"]);

    let filtered = filter_by_level_range(tree, 2, 2);
    assert_eq!(anchor_ids(&filtered), vec!["a", "c"]);
    assert!(filtered.iter().all(|node| node.children.is_empty()));
}
