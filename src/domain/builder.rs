//! Tree builder: folds `parent:child1,child2,...` lines into a family tree.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::entities::Relationship;
use crate::domain::error::{DomainError, TreeResult};

/// Whether the builder has seen its first valid line yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No root yet: the next valid line's parent becomes the root
    Empty,
    /// Root exists: every parent must already be in the tree
    Populated,
}

/// Constructs a family tree line by line.
///
/// Errors abort the current line before anything is mutated; earlier lines
/// stay in the tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: TreeArena,
    lines_read: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from all `lines`, stopping at the first bad one.
    pub fn build_from_lines<I, S>(lines: I) -> TreeResult<TreeArena>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for line in lines {
            builder.add_line(line.as_ref())?;
        }
        Ok(builder.finish())
    }

    pub fn state(&self) -> BuilderState {
        if self.tree.is_empty() {
            BuilderState::Empty
        } else {
            BuilderState::Populated
        }
    }

    /// Number of lines offered so far, including the failing one.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    pub fn finish(self) -> TreeArena {
        self.tree
    }

    /// Ingest one line.
    ///
    /// # Errors
    /// * `InvalidFormat` if the line has no `:`
    /// * `NoSuchParent` if the tree has a root and the parent name is not in it
    #[instrument(level = "debug", skip(self))]
    pub fn add_line(&mut self, line: &str) -> TreeResult<()> {
        self.lines_read += 1;
        let line_no = self.lines_read;

        let relationship =
            Relationship::parse(line).ok_or_else(|| DomainError::InvalidFormat {
                line_no,
                line: line.to_string(),
            })?;

        let parent = self.resolve_parent(relationship.parent, line_no)?;
        for child in &relationship.children {
            self.tree.insert_child(parent, child)?;
        }
        debug!(
            "line {}: {} -> {} children",
            line_no,
            relationship.parent,
            relationship.children.len()
        );
        Ok(())
    }

    fn resolve_parent(&mut self, name: &str, line_no: usize) -> TreeResult<Index> {
        match self.state() {
            BuilderState::Empty => self.tree.insert_root(name),
            BuilderState::Populated => {
                self.tree
                    .find(name)
                    .ok_or_else(|| DomainError::NoSuchParent {
                        line_no,
                        name: name.to_string(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_creates_root() {
        let mut builder = TreeBuilder::new();
        assert_eq!(builder.state(), BuilderState::Empty);

        builder.add_line("A:B,C").unwrap();

        assert_eq!(builder.state(), BuilderState::Populated);
        let tree = builder.tree();
        let root = tree.root().unwrap();
        assert_eq!(tree.name(root), Some("A"));
        assert_eq!(tree.get_node(root).unwrap().children.len(), 2);
    }

    #[test]
    fn test_unknown_parent_adds_nothing() {
        let mut builder = TreeBuilder::new();
        builder.add_line("A:B").unwrap();

        let err = builder.add_line("Q:R,S").unwrap_err();

        assert_eq!(
            err,
            DomainError::NoSuchParent {
                line_no: 2,
                name: "Q".to_string()
            }
        );
        assert_eq!(builder.tree().len(), 2);
        assert!(builder.tree().find("R").is_none());
    }

    #[test]
    fn test_format_error_on_empty_builder_keeps_it_empty() {
        let mut builder = TreeBuilder::new();
        let err = builder.add_line("NoColonHere").unwrap_err();
        assert!(err.is_format());
        assert_eq!(builder.state(), BuilderState::Empty);

        builder.add_line("X:Y").unwrap();
        assert_eq!(builder.tree().name(builder.tree().root().unwrap()), Some("X"));
        assert_eq!(builder.lines_read(), 2);
    }

    #[test]
    fn test_populated_state_survives_errors() {
        let mut builder = TreeBuilder::new();
        builder.add_line("A:B").unwrap();
        let _ = builder.add_line("broken");
        let _ = builder.add_line("Nobody:X");
        assert_eq!(builder.state(), BuilderState::Populated);

        builder.add_line("B:C").unwrap();
        assert!(builder.tree().find("C").is_some());
    }

    #[test]
    fn test_build_from_lines_stops_at_first_error() {
        let err = TreeBuilder::build_from_lines(["A:B", "bad", "B:C"]).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidFormat {
                line_no: 2,
                line: "bad".to_string()
            }
        );
    }

    #[test]
    fn test_parent_on_later_line_may_be_a_root_again() {
        // Naming the root again just appends more children to it
        let tree = TreeBuilder::build_from_lines(["A:B", "A:C"]).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.get_node(root).unwrap().children.len(), 2);
    }
}
