/*
Box-drawing rendering of the family tree via termtree.
Kept out of the domain layer so the arena does not depend on display crates.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::config::RenderStyle;
use crate::domain::TreeArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &TreeArena, node_idx: Index) -> Tree<String> {
            let leaves: Vec<_> = arena
                .get_node(node_idx)
                .map(|node| {
                    node.children
                        .iter()
                        .map(|&child| build_tree(arena, child))
                        .collect()
                })
                .unwrap_or_default();
            Tree::new(arena.name(node_idx).unwrap_or_default().to_string()).with_leaves(leaves)
        }

        match self.root() {
            Some(root_idx) => build_tree(self, root_idx),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

/// Render the whole tree in the requested style.
pub fn render_tree(tree: &TreeArena, style: RenderStyle) -> String {
    match style {
        RenderStyle::Indent => tree.to_string(),
        RenderStyle::Ascii => tree.to_tree_string().to_string(),
    }
}
