//! Domain layer: the family tree and its queries
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod ancestry;
pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;

pub use arena::{NodeData, TreeArena, TreeIterator, TreeNode};
pub use builder::{BuilderState, TreeBuilder};
pub use entities::Relationship;
pub use error::{DomainError, TreeResult};
pub use generational_arena::Index;
