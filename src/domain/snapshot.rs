//! Snapshot encoding and consistency validation.
//!
//! A snapshot is the full tree serialized as a JSON array of node records,
//! written after every successful mutation and read back on startup.
//! Loading validates the structural invariants instead of trusting stored
//! links: a snapshot whose `parentId`/`children` fields disagree is
//! rejected, and the caller falls back to a fresh default tree. The one
//! repair applied to an otherwise valid snapshot is forcing the root's
//! `collapsed` flag off.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use thiserror::Error;
use tracing::debug;

use crate::domain::node::{Node, NodeId, ROOT_ID};
use crate::domain::tree::TreeStore;

/// Why a stored snapshot was refused.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot is empty")]
    Empty,

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("missing root node (id {ROOT_ID})")]
    MissingRoot,

    #[error("root node has a parent")]
    RootHasParent,

    #[error("node {0} has no parent but is not the root")]
    Orphan(NodeId),

    #[error("node {child} references missing parent {parent}")]
    DanglingParent { child: NodeId, parent: NodeId },

    #[error("parent/child links disagree between {parent} and {child}")]
    LinkMismatch { parent: NodeId, child: NodeId },

    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Serialize the full tree, nodes in ascending id order.
pub fn encode(store: &TreeStore) -> serde_json::Result<String> {
    let nodes: Vec<&Node> = store.nodes().collect();
    serde_json::to_string(&nodes)
}

/// Parse and validate a stored snapshot, rebuilding the store.
///
/// The root's `collapsed` flag is forced off regardless of the stored
/// value; everything else must already be consistent.
pub fn decode(raw: &str) -> SnapshotResult<TreeStore> {
    let records: Vec<Node> = serde_json::from_str(raw)?;

    let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
    for node in records {
        let id = node.id;
        if nodes.insert(id, node).is_some() {
            return Err(SnapshotError::DuplicateId(id));
        }
    }
    validate(&nodes)?;

    if let Some(root) = nodes.get_mut(&ROOT_ID) {
        if root.collapsed {
            debug!("repairing snapshot: clearing collapsed flag on root");
            root.collapsed = false;
        }
    }

    Ok(TreeStore::from_validated(nodes))
}

/// Check the structural invariants of a stored node set:
/// exactly one parentless node (the root, id 0), bidirectionally
/// consistent links, and every node reachable from the root.
fn validate(nodes: &BTreeMap<NodeId, Node>) -> SnapshotResult<()> {
    if nodes.is_empty() {
        return Err(SnapshotError::Empty);
    }

    match nodes.get(&ROOT_ID) {
        None => return Err(SnapshotError::MissingRoot),
        Some(root) if root.parent.is_some() => return Err(SnapshotError::RootHasParent),
        Some(_) => {}
    }

    for node in nodes.values() {
        // Parent side: every non-root names an existing parent that lists
        // it exactly once.
        if node.id != ROOT_ID {
            let parent_id = node.parent.ok_or(SnapshotError::Orphan(node.id))?;
            let parent = nodes.get(&parent_id).ok_or(SnapshotError::DanglingParent {
                child: node.id,
                parent: parent_id,
            })?;
            let links = parent.children.iter().filter(|&&c| c == node.id).count();
            if links != 1 {
                return Err(SnapshotError::LinkMismatch {
                    parent: parent_id,
                    child: node.id,
                });
            }
        }

        // Child side: every listed child exists and points back.
        for &child_id in &node.children {
            let child = nodes.get(&child_id).ok_or(SnapshotError::LinkMismatch {
                parent: node.id,
                child: child_id,
            })?;
            if child.parent != Some(node.id) {
                return Err(SnapshotError::LinkMismatch {
                    parent: node.id,
                    child: child_id,
                });
            }
        }
    }

    // Reachability. With the link checks above this also rules out cycles,
    // since a cycle member can never be reached from the root.
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();
    let mut queue = VecDeque::from([ROOT_ID]);
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(node) = nodes.get(&id) {
            queue.extend(node.children.iter().copied());
        }
    }
    if seen.len() != nodes.len() {
        let stray = nodes
            .keys()
            .find(|id| !seen.contains(id))
            .copied()
            .unwrap_or(ROOT_ID);
        return Err(SnapshotError::Unreachable(stray));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("not json"), Err(SnapshotError::Parse(_))));
        assert!(matches!(decode("[]"), Err(SnapshotError::Empty)));
    }

    #[test]
    fn decode_rejects_missing_root() {
        let raw = r#"[{"id":1,"text":"a","x":0.0,"y":0.0,"parentId":null,"children":[]}]"#;
        assert!(matches!(decode(raw), Err(SnapshotError::MissingRoot)));
    }

    #[test]
    fn decode_rejects_one_sided_child_link() {
        let raw = r#"[
            {"id":0,"text":"r","x":0.0,"y":0.0,"parentId":null,"children":[1,2]},
            {"id":1,"text":"a","x":0.0,"y":0.0,"parentId":0,"children":[]}
        ]"#;
        assert!(matches!(
            decode(raw),
            Err(SnapshotError::LinkMismatch { parent: 0, child: 2 })
        ));
    }

    #[test]
    fn decode_clears_collapsed_root() {
        let raw = r#"[{"id":0,"text":"r","x":1.0,"y":2.0,"parentId":null,"children":[],"collapsed":true}]"#;
        let store = decode(raw).unwrap();
        assert!(!store.root().collapsed);
    }

    #[test]
    fn missing_collapsed_field_defaults_to_false() {
        let raw = r#"[{"id":0,"text":"r","x":1.0,"y":2.0,"parentId":null,"children":[]}]"#;
        let store = decode(raw).unwrap();
        assert!(!store.root().collapsed);
    }
}
