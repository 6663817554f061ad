//! Infrastructure layer: I/O boundary implementations

pub mod traits;

pub use traits::{JsonFileStore, MemoryStore, NullRenderer, Renderer, SnapshotStore};
