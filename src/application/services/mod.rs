//! Application services

pub mod family_tree;

pub use family_tree::{FamilyTreeService, MrcaOutcome};
