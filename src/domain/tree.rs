//! Arena-based mind map tree with mutation commands and visibility query.
//!
//! `TreeStore` owns every node in an id-keyed map and treats `parent` and
//! `children` as indices into that map, never as references, so subtree
//! deletion is a plain map removal with no lifetime hazards. All commands
//! are atomic: a command that fails leaves the tree untouched.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, NodeId, ROOT_ID};

/// An edge between two visible nodes, child side pointing at its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
}

/// Read-only view handed to renderers: visible nodes in preorder plus the
/// edge from each visible non-root node to its parent.
#[derive(Debug)]
pub struct VisibleTree<'a> {
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<Edge>,
}

impl VisibleTree<'_> {
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// Arena-backed tree store.
///
/// Exactly one node has no parent (the root, id 0); it is never deleted and
/// never collapsed. Every other node's id appears in exactly one children
/// list, forming a single connected acyclic tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStore {
    nodes: BTreeMap<NodeId, Node>,
    /// Next id to hand out. Monotone within a session so deleted ids are
    /// never reused, even when `max(existing) + 1` would collide with one.
    next_id: NodeId,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeStore {
    /// A first-run tree: single default root.
    pub fn new() -> Self {
        let root = Node::root();
        let mut nodes = BTreeMap::new();
        nodes.insert(root.id, root);
        Self {
            nodes,
            next_id: ROOT_ID + 1,
        }
    }

    /// Rebuild a store from already-validated nodes (snapshot load path).
    /// The id counter restarts above the highest stored id.
    pub(crate) fn from_validated(nodes: BTreeMap<NodeId, Node>) -> Self {
        let next_id = nodes.keys().max().copied().unwrap_or(ROOT_ID) + 1;
        Self { nodes, next_id }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn root(&self) -> &Node {
        // Root removal is rejected by every command, so the entry exists.
        &self.nodes[&ROOT_ID]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ascending id order (storage order, not tree order).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Depth-first preorder over the whole tree, collapsed or not.
    pub fn iter(&self) -> TreeIter<'_> {
        TreeIter {
            store: self,
            stack: vec![ROOT_ID],
            skip_collapsed: false,
        }
    }

    /// Create a child of `parent` with a fresh id strictly greater than
    /// every id ever handed out, appended to the parent's children.
    #[instrument(level = "debug", skip(self))]
    pub fn add_node(&mut self, parent: NodeId) -> DomainResult<NodeId> {
        let parent_node = self
            .nodes
            .get(&parent)
            .ok_or(DomainError::NotFound(parent))?;

        let node = Node::child_of(self.next_id, parent_node);
        let id = node.id;
        self.next_id += 1;

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        self.nodes.insert(id, node);

        debug!("added node {} under {}", id, parent);
        Ok(id)
    }

    /// Remove `id` and its entire subtree. Returns the number of nodes
    /// removed. The root cannot be deleted.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, id: NodeId) -> DomainResult<usize> {
        if id == ROOT_ID {
            return Err(DomainError::RootProtected("delete"));
        }
        let parent = self
            .nodes
            .get(&id)
            .ok_or(DomainError::NotFound(id))?
            .parent;

        // Excise from the parent's children first so the tree stays
        // connected from the outside while the subtree drains.
        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent_node.children.retain(|&child| child != id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                removed += 1;
                stack.extend(node.children);
            }
        }

        debug!("deleted node {} ({} nodes removed)", id, removed);
        Ok(removed)
    }

    /// Replace a node's label verbatim. Empty strings are accepted here;
    /// rejecting empty input is the input adapter's call.
    #[instrument(level = "debug", skip(self, text))]
    pub fn edit_node(&mut self, id: NodeId, text: impl Into<String>) -> DomainResult<()> {
        let node = self.nodes.get_mut(&id).ok_or(DomainError::NotFound(id))?;
        node.text = text.into();
        Ok(())
    }

    /// Flip a node's collapsed flag and return the new state. Descendants
    /// keep their own flags; only visibility changes. The root cannot be
    /// collapsed.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle_collapse(&mut self, id: NodeId) -> DomainResult<bool> {
        if id == ROOT_ID {
            return Err(DomainError::RootProtected("collapse"));
        }
        let node = self.nodes.get_mut(&id).ok_or(DomainError::NotFound(id))?;
        node.collapsed = !node.collapsed;
        Ok(node.collapsed)
    }

    /// Set a node's absolute canvas position. No bounds checking, no
    /// collision avoidance.
    #[instrument(level = "debug", skip(self))]
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> DomainResult<()> {
        let node = self.nodes.get_mut(&id).ok_or(DomainError::NotFound(id))?;
        node.x = x;
        node.y = y;
        Ok(())
    }

    /// Derive the render view: a node is visible iff it is the root, or its
    /// parent is visible and not collapsed. Nodes come out in preorder, so
    /// both endpoints of every emitted edge are already in the node list.
    pub fn visible(&self) -> VisibleTree<'_> {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        let iter = TreeIter {
            store: self,
            stack: vec![ROOT_ID],
            skip_collapsed: true,
        };
        for node in iter {
            if let Some(parent) = node.parent {
                edges.push(Edge {
                    parent,
                    child: node.id,
                });
            }
            nodes.push(node);
        }

        VisibleTree { nodes, edges }
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(ROOT_ID, 1)];
        while let Some((id, depth)) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                max_depth = max_depth.max(depth);
                for &child in &node.children {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }
}

/// Iterative depth-first preorder walk. With `skip_collapsed` set it never
/// descends below a collapsed node, which is exactly the visibility rule.
pub struct TreeIter<'a> {
    store: &'a TreeStore,
    stack: Vec<NodeId>,
    skip_collapsed: bool,
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.store.get(id) {
                if !(self.skip_collapsed && node.collapsed) {
                    // Reverse push keeps children in creation order.
                    for &child in node.children.iter().rev() {
                        self.stack.push(child);
                    }
                }
                return Some(node);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::{NEW_NODE_TEXT, ROOT_TEXT};

    #[test]
    fn new_store_holds_single_default_root() {
        let store = TreeStore::new();
        assert_eq!(store.len(), 1);
        let root = store.root();
        assert_eq!(root.id, ROOT_ID);
        assert_eq!(root.text, ROOT_TEXT);
        assert_eq!((root.x, root.y), (50.0, 50.0));
        assert!(!root.collapsed);
    }

    #[test]
    fn add_node_offsets_from_parent_and_links_both_ways() {
        let mut store = TreeStore::new();
        let id = store.add_node(ROOT_ID).unwrap();
        assert_eq!(id, 1);

        let node = store.get(id).unwrap();
        assert_eq!(node.text, NEW_NODE_TEXT);
        assert_eq!((node.x, node.y), (200.0, 100.0));
        assert_eq!(node.parent, Some(ROOT_ID));
        assert_eq!(store.root().children, vec![id]);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let mut store = TreeStore::new();
        let a = store.add_node(ROOT_ID).unwrap();
        let b = store.add_node(ROOT_ID).unwrap();
        store.delete_node(b).unwrap();
        let c = store.add_node(ROOT_ID).unwrap();
        assert!(c > b, "id {} reused after deleting {}", c, b);
        assert!(a < b && b < c);
    }

    #[test]
    fn failed_command_leaves_tree_unchanged() {
        let mut store = TreeStore::new();
        store.add_node(ROOT_ID).unwrap();
        let before = store.clone();

        assert_eq!(store.add_node(99), Err(DomainError::NotFound(99)));
        assert_eq!(store.delete_node(99), Err(DomainError::NotFound(99)));
        assert_eq!(store.edit_node(99, "x"), Err(DomainError::NotFound(99)));
        assert_eq!(store.toggle_collapse(99), Err(DomainError::NotFound(99)));
        assert_eq!(
            store.move_node(99, 0.0, 0.0),
            Err(DomainError::NotFound(99))
        );
        assert_eq!(
            store.delete_node(ROOT_ID),
            Err(DomainError::RootProtected("delete"))
        );
        assert_eq!(
            store.toggle_collapse(ROOT_ID),
            Err(DomainError::RootProtected("collapse"))
        );

        assert_eq!(store, before);
    }

    #[test]
    fn iter_visits_whole_tree_in_preorder() {
        let mut store = TreeStore::new();
        let a = store.add_node(ROOT_ID).unwrap();
        let b = store.add_node(ROOT_ID).unwrap();
        let a1 = store.add_node(a).unwrap();

        let order: Vec<NodeId> = store.iter().map(|n| n.id).collect();
        assert_eq!(order, vec![ROOT_ID, a, a1, b]);
    }

    #[test]
    fn depth_counts_longest_branch() {
        let mut store = TreeStore::new();
        let a = store.add_node(ROOT_ID).unwrap();
        let a1 = store.add_node(a).unwrap();
        store.add_node(a1).unwrap();
        store.add_node(ROOT_ID).unwrap();
        assert_eq!(store.depth(), 4);
    }
}
