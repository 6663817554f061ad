//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeId;

/// Domain errors represent rejected tree commands.
///
/// Both variants are recoverable: the command is refused and the tree is
/// left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The referenced id is not in the tree (caller bug or stale id).
    #[error("node not found: {0}")]
    NotFound(NodeId),

    /// The command would delete or collapse the root node.
    #[error("cannot {0} the root node")]
    RootProtected(&'static str),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
