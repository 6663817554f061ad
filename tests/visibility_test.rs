//! Tests for the derived visibility query

use mindtree::domain::{Edge, NodeId, TreeStore, ROOT_ID};
use mindtree::util::testing::init_test_setup;
use rstest::{fixture, rstest};

/// root (0)
/// ├── a (1)
/// │   ├── a1 (3)
/// │   │   └── a1x (5)
/// │   └── a2 (4)
/// └── b (2)
#[fixture]
fn deep_tree() -> TreeStore {
    init_test_setup();
    let mut store = TreeStore::new();
    let a = store.add_node(ROOT_ID).unwrap();
    store.add_node(ROOT_ID).unwrap();
    let a1 = store.add_node(a).unwrap();
    store.add_node(a).unwrap();
    store.add_node(a1).unwrap();
    store
}

fn visible_ids(store: &TreeStore) -> Vec<NodeId> {
    store.visible().nodes.iter().map(|n| n.id).collect()
}

// ============================================================
// Ordering and Edges
// ============================================================

#[rstest]
fn given_expanded_tree_when_computing_visible_then_preorder_with_all_edges(deep_tree: TreeStore) {
    let view = deep_tree.visible();

    let ids: Vec<NodeId> = view.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![0, 1, 3, 5, 4, 2]);

    assert_eq!(view.edges.len(), 5, "one edge per non-root visible node");
    for edge in &view.edges {
        assert!(view.contains(edge.parent), "edge parent must be visible");
        assert!(view.contains(edge.child), "edge child must be visible");
    }
}

#[rstest]
fn given_collapsed_node_when_computing_visible_then_no_edges_below_it(mut deep_tree: TreeStore) {
    deep_tree.toggle_collapse(1).unwrap();
    let view = deep_tree.visible();

    assert_eq!(
        view.edges,
        vec![
            Edge { parent: 0, child: 1 },
            Edge { parent: 0, child: 2 },
        ]
    );
}

// ============================================================
// Collapse Semantics
// ============================================================

#[rstest]
fn given_collapse_toggle_when_comparing_sets_then_exactly_strict_descendants_vanish(
    mut deep_tree: TreeStore,
) {
    let before = visible_ids(&deep_tree);

    deep_tree.toggle_collapse(1).unwrap();
    let after = visible_ids(&deep_tree);

    // The collapsed node itself stays visible.
    assert!(after.contains(&1));
    let hidden: Vec<NodeId> = before.iter().copied().filter(|id| !after.contains(id)).collect();
    assert_eq!(hidden, vec![3, 5, 4], "strict descendants of 1, in preorder");
}

#[rstest]
fn given_nested_collapsed_flags_when_expanding_outer_then_inner_still_hides(
    mut deep_tree: TreeStore,
) {
    deep_tree.toggle_collapse(3).unwrap();
    deep_tree.toggle_collapse(1).unwrap();
    assert_eq!(visible_ids(&deep_tree), vec![0, 1, 2]);

    // Expanding the outer node must not disturb the inner flag.
    deep_tree.toggle_collapse(1).unwrap();
    assert_eq!(visible_ids(&deep_tree), vec![0, 1, 3, 4, 2]);
    assert!(deep_tree.get(3).unwrap().collapsed);
    assert!(!visible_ids(&deep_tree).contains(&5));
}

#[rstest]
fn given_collapsed_ancestor_when_any_descendant_queried_then_hidden(mut deep_tree: TreeStore) {
    deep_tree.toggle_collapse(1).unwrap();
    let view = deep_tree.visible();
    for id in [3, 4, 5] {
        assert!(
            !view.contains(id),
            "node {} has collapsed ancestor 1 and must be hidden",
            id
        );
    }
}

// ============================================================
// Fresh Tree
// ============================================================

#[test]
fn given_fresh_tree_when_computing_visible_then_single_root_no_edges() {
    init_test_setup();
    let store = TreeStore::new();
    let view = store.visible();

    assert_eq!(view.nodes.len(), 1);
    assert_eq!(view.nodes[0].id, ROOT_ID);
    assert!(view.edges.is_empty());
}
