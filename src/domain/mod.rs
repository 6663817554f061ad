//! Domain layer: tree state and business rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! config loading).

pub mod error;
pub mod node;
pub mod snapshot;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use node::{Node, NodeId, ROOT_ID};
pub use snapshot::{SnapshotError, SnapshotResult};
pub use tree::{Edge, TreeStore, VisibleTree};
