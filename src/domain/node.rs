//! Node records: label, canvas position and tree links.

use serde::{Deserialize, Serialize};

/// Identifier for a node.
///
/// Ids are allocated monotonically within a session and never reused after
/// deletion, so a stale id held by an adapter always misses instead of
/// silently aliasing a newer node.
pub type NodeId = u64;

/// Id of the root node. The root always exists, is never deleted and never
/// collapsed.
pub const ROOT_ID: NodeId = 0;

/// Label given to the root on first run.
pub const ROOT_TEXT: &str = "Root Node";

/// Label given to freshly created nodes.
pub const NEW_NODE_TEXT: &str = "New Node";

/// Canvas position of the root on first run.
pub const ROOT_POS: (f64, f64) = (50.0, 50.0);

/// Offset of a new child relative to its parent.
pub const CHILD_OFFSET: (f64, f64) = (150.0, 50.0);

/// A single mind-map entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Parent id, `None` only for the root
    #[serde(rename = "parentId")]
    pub parent: Option<NodeId>,
    /// Child ids in creation order
    pub children: Vec<NodeId>,
    /// Hides the subtree from rendering, not from storage.
    /// Older snapshots lack this field, hence the serde default.
    #[serde(default)]
    pub collapsed: bool,
}

impl Node {
    /// The root node of a first-run tree.
    pub fn root() -> Self {
        Self {
            id: ROOT_ID,
            text: ROOT_TEXT.to_string(),
            x: ROOT_POS.0,
            y: ROOT_POS.1,
            parent: None,
            children: Vec::new(),
            collapsed: false,
        }
    }

    /// A fresh child, offset from its parent's position.
    pub fn child_of(id: NodeId, parent: &Node) -> Self {
        Self {
            id,
            text: NEW_NODE_TEXT.to_string(),
            x: parent.x + CHILD_OFFSET.0,
            y: parent.y + CHILD_OFFSET.1,
            parent: Some(parent.id),
            children: Vec::new(),
            collapsed: false,
        }
    }
}
