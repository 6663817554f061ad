//! Terminal renderer for the visible tree
//!
//! Stands in for a graphical canvas: termtree draws the hierarchy, each
//! label carries the node's canvas position, and collapsed nodes get a
//! `[+]` marker since their subtree is hidden but still stored.

use std::collections::HashMap;

use colored::Colorize;
use termtree::Tree;

use crate::domain::{Node, NodeId, VisibleTree};
use crate::infrastructure::traits::Renderer;

/// Renderer printing the visible view as an indented tree on stdout.
#[derive(Debug, Default)]
pub struct TermRenderer;

impl Renderer for TermRenderer {
    fn render(&self, view: &VisibleTree<'_>) {
        let Some(root) = view.nodes.first() else {
            return;
        };

        let index: HashMap<NodeId, &Node> = view.nodes.iter().map(|n| (n.id, *n)).collect();
        // Edges arrive in preorder, so per-parent grouping keeps the
        // children in creation order.
        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for edge in &view.edges {
            children.entry(edge.parent).or_default().push(edge.child);
        }

        println!("{}", subtree(root.id, &index, &children));
    }
}

fn subtree(
    id: NodeId,
    index: &HashMap<NodeId, &Node>,
    children: &HashMap<NodeId, Vec<NodeId>>,
) -> Tree<String> {
    let text = index.get(&id).map(|n| label(n)).unwrap_or_default();
    let leaves: Vec<Tree<String>> = children
        .get(&id)
        .map(|kids| kids.iter().map(|&c| subtree(c, index, children)).collect())
        .unwrap_or_default();
    Tree::new(text).with_leaves(leaves)
}

fn label(node: &Node) -> String {
    let meta = format!("#{} ({:.0},{:.0})", node.id, node.x, node.y);
    let mut text = format!("{} {}", node.text, meta.dimmed());
    if node.collapsed {
        text = format!("{} {}", text, "[+]".yellow());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TreeStore, ROOT_ID};

    #[test]
    fn label_marks_collapsed_nodes() {
        let mut store = TreeStore::new();
        let id = store.add_node(ROOT_ID).unwrap();
        store.toggle_collapse(id).unwrap();

        let rendered = label(store.get(id).unwrap());
        assert!(rendered.contains("[+]"));
        assert!(rendered.contains("New Node"));
    }

    #[test]
    fn render_handles_empty_view_without_panicking() {
        let view = VisibleTree {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        TermRenderer.render(&view);
    }
}
