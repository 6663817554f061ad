//! Mind map command service
//!
//! Owns the tree store and executes user-intent commands against it.
//! Every successful mutation is followed by the same two side effects, in
//! order: persist the full snapshot, then hand the visible view to the
//! renderer. Rejected commands do neither, so storage only ever holds
//! states the tree actually reached.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{snapshot, NodeId, TreeStore};
use crate::infrastructure::traits::{Renderer, SnapshotStore};

/// Service executing tree commands with persistence and render side effects.
pub struct MindMapService {
    tree: TreeStore,
    store: Arc<dyn SnapshotStore>,
    renderer: Arc<dyn Renderer>,
}

impl MindMapService {
    /// Start a session: restore the stored snapshot, or begin with a fresh
    /// single-root tree when nothing usable is stored. A snapshot that
    /// fails to parse or validate is replaced rather than fatal.
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        renderer: Arc<dyn Renderer>,
    ) -> ApplicationResult<Self> {
        let tree = match store
            .load()
            .map_err(|e| ApplicationError::failed("load snapshot", e))?
        {
            Some(raw) => match snapshot::decode(&raw) {
                Ok(tree) => {
                    debug!("restored snapshot with {} nodes", tree.len());
                    tree
                }
                Err(e) => {
                    warn!("stored snapshot rejected ({}), starting fresh", e);
                    TreeStore::new()
                }
            },
            None => TreeStore::new(),
        };

        Ok(Self {
            tree,
            store,
            renderer,
        })
    }

    /// Read-only access to the current tree state.
    pub fn tree(&self) -> &TreeStore {
        &self.tree
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_node(&mut self, parent: NodeId) -> ApplicationResult<NodeId> {
        let id = self.tree.add_node(parent)?;
        self.commit()?;
        Ok(id)
    }

    /// Delete a node and its subtree; returns how many nodes went away.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, id: NodeId) -> ApplicationResult<usize> {
        let removed = self.tree.delete_node(id)?;
        self.commit()?;
        Ok(removed)
    }

    #[instrument(level = "debug", skip(self, text))]
    pub fn edit_node(&mut self, id: NodeId, text: &str) -> ApplicationResult<()> {
        self.tree.edit_node(id, text)?;
        self.commit()
    }

    /// Flip a node's collapsed flag; returns the new state.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle_collapse(&mut self, id: NodeId) -> ApplicationResult<bool> {
        let collapsed = self.tree.toggle_collapse(id)?;
        self.commit()?;
        Ok(collapsed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> ApplicationResult<()> {
        self.tree.move_node(id, x, y)?;
        self.commit()
    }

    /// Throw the tree away and start over, exactly like a first run.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) -> ApplicationResult<()> {
        self.tree = TreeStore::new();
        self.commit()
    }

    /// Re-render the current visible view without mutating anything.
    pub fn render(&self) {
        self.renderer.render(&self.tree.visible());
    }

    fn commit(&mut self) -> ApplicationResult<()> {
        let raw = snapshot::encode(&self.tree)
            .map_err(|e| ApplicationError::failed("encode snapshot", e))?;
        self.store
            .save(&raw)
            .map_err(|e| ApplicationError::failed("save snapshot", e))?;
        self.render();
        Ok(())
    }
}
