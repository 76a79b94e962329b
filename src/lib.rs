//! famtree: build a family tree from `parent:child1,child2,...` lines and
//! find the most recent common ancestor of two members.
//!
//! Layers, innermost first:
//! - [`domain`]: arena tree, line builder, ancestor queries
//! - [`infrastructure`]: line sources (file, stdin, memory)
//! - [`application`]: loading service and query use cases
//! - [`cli`]: clap commands and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use application::{ApplicationError, FamilyTreeService, MrcaOutcome};
pub use domain::{BuilderState, DomainError, TreeArena, TreeBuilder};
