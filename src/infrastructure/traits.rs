//! I/O boundary traits for testability
//!
//! These traits abstract the two collaborators of the tree store: the
//! persistence backend and the renderer. Services depend on the traits,
//! so tests can substitute in-memory doubles.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::domain::VisibleTree;

/// Persistence backend: a trivial key-value contract over one snapshot.
pub trait SnapshotStore: Send + Sync {
    /// Read the previously saved snapshot, `None` if none exists.
    fn load(&self) -> io::Result<Option<String>>;

    /// Overwrite any previously stored snapshot with the serialized tree.
    fn save(&self, snapshot: &str) -> io::Result<()>;
}

/// Render sink: consumes the visible view and produces output.
///
/// Renderers never feed state back into the tree; the view is read-only.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &VisibleTree<'_>);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Snapshot store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, snapshot: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!("writing snapshot to {}", self.path.display());
        std::fs::write(&self.path, snapshot)
    }
}

/// In-memory snapshot store. Used by tests and callers that want an
/// ephemeral tree; also counts writes so tests can assert persistence
/// happened (or did not).
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a snapshot, as if a previous session had saved it.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot.into())),
            saves: Mutex::new(0),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    /// The last saved snapshot, if any.
    pub fn current(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn save(&self, snapshot: &str) -> io::Result<()> {
        *self.slot.lock().unwrap() = Some(snapshot.to_string());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// Renderer that discards the view. Stands in wherever output is not
/// wanted, e.g. headless tests.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _view: &VisibleTree<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_counts_saves() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save("[]").unwrap();
        store.save("[1]").unwrap();
        assert_eq!(store.save_count(), 2);
        assert_eq!(store.current().as_deref(), Some("[1]"));
    }
}
