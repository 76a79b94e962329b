//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent violations of the tree format or failed lookups.
/// These are independent of where the lines came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid line {line_no} (no colon): {line:?}")]
    InvalidFormat { line_no: usize, line: String },

    #[error("no such parent on line {line_no}: {name}")]
    NoSuchParent { line_no: usize, name: String },

    #[error("no such node with name: {0}")]
    NoSuchNode(String),

    #[error("tree already has a root: {0}")]
    RootAlreadySet(String),

    #[error("node index not in tree: {0:?}")]
    UnknownIndex(Index),
}

impl DomainError {
    /// True for errors caused by a name that is not in the tree.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            DomainError::NoSuchParent { .. } | DomainError::NoSuchNode(_)
        )
    }

    /// True for errors caused by a malformed input line.
    pub fn is_format(&self) -> bool {
        matches!(self, DomainError::InvalidFormat { .. })
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
