use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::error::{DomainError, TreeResult};

/// Data payload for tree nodes: one member of the family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Name as it appeared in the input, untrimmed
    pub name: String,
}

impl NodeData {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Family member stored at this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based family tree.
///
/// The arena owns every node; parents refer to children and children refer
/// back to their parent by `Index`, so upward walks never create ownership
/// cycles. Node identity is the `Index`, not the name: duplicate names are
/// allowed and stay distinct nodes.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates the root node. A tree has exactly one root.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_root(&mut self, name: &str) -> TreeResult<Index> {
        if let Some(root) = self.root {
            return Err(DomainError::RootAlreadySet(
                self.name(root).unwrap_or_default().to_string(),
            ));
        }
        let idx = self.arena.insert(TreeNode {
            data: NodeData::new(name),
            parent: None,
            children: Vec::new(),
        });
        self.root = Some(idx);
        Ok(idx)
    }

    /// Creates a node named `name` and attaches it as last child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&mut self, parent: Index, name: &str) -> TreeResult<Index> {
        if !self.arena.contains(parent) {
            return Err(DomainError::UnknownIndex(parent));
        }
        let idx = self.arena.insert(TreeNode {
            data: NodeData::new(name),
            parent: None,
            children: Vec::new(),
        });
        self.add_child(parent, idx);
        Ok(idx)
    }

    /// Appends `child` to the children of `parent` and points the child back
    /// at it. Does not check for duplicates.
    fn add_child(&mut self, parent: Index, child: Index) {
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = self.arena.get_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Name of the node at `idx`, `None` for an index that is not in the tree.
    pub fn name(&self, idx: Index) -> Option<&str> {
        self.arena.get(idx).map(|node| node.data.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Searches the subtree at `start` for a node named `target`.
    ///
    /// Pre-order: the start node first, then each child subtree left to
    /// right. With duplicate names the first node met in that order wins.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_name(&self, start: Index, target: &str) -> Option<Index> {
        self.iter_from(start)
            .find(|(_, node)| node.data.name == target)
            .map(|(idx, _)| idx)
    }

    /// Searches the whole tree from the root.
    pub fn find(&self, target: &str) -> Option<Index> {
        self.root.and_then(|root| self.find_by_name(root, target))
    }

    /// Ancestors of `idx` ordered from its parent up to the root.
    ///
    /// The node itself is never part of its ancestor chain, so the root
    /// yields an empty list.
    #[instrument(level = "trace", skip(self))]
    pub fn collect_ancestors(&self, idx: Index) -> Vec<Index> {
        let first = self.get_node(idx).and_then(|node| node.parent);
        std::iter::successors(first, |&current| {
            self.get_node(current).and_then(|node| node.parent)
        })
        .collect()
    }

    /// Number of parent hops from `idx` to the root.
    pub fn depth_of(&self, idx: Index) -> usize {
        self.collect_ancestors(idx).len()
    }

    /// Pre-order walk over the whole tree.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order walk over the subtree at `start`.
    pub fn iter_from(&self, start: Index) -> TreeIterator {
        TreeIterator::new(self, Some(start))
    }

    /// Indented rendering of the subtree at `idx`, two spaces per level.
    pub fn render(&self, idx: Index) -> String {
        let mut out = String::new();
        self.render_with_indent(idx, 0, &mut out);
        out
    }

    fn render_with_indent(&self, idx: Index, level: usize, out: &mut String) {
        if let Some(node) = self.get_node(idx) {
            out.push_str(&"  ".repeat(level));
            out.push_str(&node.data.name);
            out.push('\n');
            for &child in &node.children {
                self.render_with_indent(child, level + 1, out);
            }
        }
    }
}

impl fmt::Display for TreeArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Family Tree:\n\n")?;
        if let Some(root) = self.root {
            write!(f, "{}", self.render(root))?;
        }
        Ok(())
    }
}

/// Pre-order iterator: a node, then each child subtree left to right.
pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.arena.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (TreeArena, Index, Index, Index) {
        let mut tree = TreeArena::new();
        let a = tree.insert_root("A").unwrap();
        let b = tree.insert_child(a, "B").unwrap();
        let c = tree.insert_child(a, "C").unwrap();
        tree.insert_child(b, "D").unwrap();
        tree.insert_child(b, "E").unwrap();
        tree.insert_child(c, "F").unwrap();
        (tree, a, b, c)
    }

    #[test]
    fn test_insert_child_sets_parent_and_order() {
        let (tree, a, b, c) = sample();
        let root = tree.get_node(a).unwrap();
        assert_eq!(root.children, vec![b, c]);
        assert_eq!(tree.get_node(b).unwrap().parent, Some(a));
        assert_eq!(tree.get_node(a).unwrap().parent, None);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_second_root_is_rejected() {
        let (mut tree, _, _, _) = sample();
        let err = tree.insert_root("Z").unwrap_err();
        assert_eq!(err, DomainError::RootAlreadySet("A".to_string()));
    }

    #[test]
    fn test_insert_child_of_foreign_index_fails() {
        let (other, _, _, _) = sample();
        // F lives in the last slot of `other`; a one-node arena has no such slot
        let missing = other.find("F").unwrap();
        let mut tree = TreeArena::new();
        tree.insert_root("X").unwrap();

        assert!(matches!(
            tree.insert_child(missing, "Z"),
            Err(DomainError::UnknownIndex(_))
        ));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_find_by_name_prefers_first_preorder_match() {
        let mut tree = TreeArena::new();
        let root = tree.insert_root("R").unwrap();
        let left = tree.insert_child(root, "L").unwrap();
        let right = tree.insert_child(root, "Dup").unwrap();
        let deep = tree.insert_child(left, "Dup").unwrap();

        // The nested node under L is visited before R's second child
        assert_eq!(tree.find("Dup"), Some(deep));
        assert_ne!(tree.find("Dup"), Some(right));
        assert_eq!(tree.find_by_name(right, "Dup"), Some(right));
        assert_eq!(tree.find_by_name(left, "R"), None);
    }

    #[test]
    fn test_collect_ancestors_orders_nearest_first() {
        let (tree, a, b, _) = sample();
        let d = tree.find("D").unwrap();
        assert_eq!(tree.collect_ancestors(d), vec![b, a]);
        assert!(tree.collect_ancestors(a).is_empty());
        assert_eq!(tree.depth_of(d), 2);
        assert_eq!(tree.depth_of(a), 0);
    }

    #[test]
    fn test_render_indents_two_spaces_per_level() {
        let (tree, a, _, c) = sample();
        assert_eq!(tree.render(a), "A\n  B\n    D\n    E\n  C\n    F\n");
        assert_eq!(tree.render(c), "C\n  F\n");
        assert_eq!(
            tree.to_string(),
            "Family Tree:\n\nA\n  B\n    D\n    E\n  C\n    F\n"
        );
    }

    #[test]
    fn test_iterators_visit_every_node() {
        let (tree, _, b, _) = sample();
        let pre: Vec<_> = tree.iter().map(|(_, n)| n.data.name.as_str()).collect();
        assert_eq!(pre, vec!["A", "B", "D", "E", "C", "F"]);
        let sub: Vec<_> = tree
            .iter_from(b)
            .map(|(_, n)| n.data.name.as_str())
            .collect();
        assert_eq!(sub, vec!["B", "D", "E"]);
        assert_eq!(TreeArena::new().iter().count(), 0);
        assert!(TreeArena::new().is_empty());
    }

    #[test]
    fn test_name_of_foreign_index_is_none() {
        let (other, _, _, _) = sample();
        let missing = other.find("F").unwrap();
        let mut tree = TreeArena::new();
        let x = tree.insert_root("X").unwrap();

        assert_eq!(tree.name(x), Some("X"));
        assert_eq!(tree.name(missing), None);
        assert_eq!(other.name(missing), Some("F"));
    }

    #[test]
    fn test_find_by_name_with_foreign_start_is_none() {
        let (other, _, _, _) = sample();
        let missing = other.find("F").unwrap();
        let mut tree = TreeArena::new();
        tree.insert_root("F").unwrap();

        assert_eq!(tree.find_by_name(missing, "F"), None);
        assert!(tree.find("F").is_some());
    }
}
