//! Most recent common ancestor queries.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, TreeResult};

impl TreeArena {
    /// Returns the deepest node that is an ancestor of both `name1` and `name2`.
    ///
    /// Names are resolved with [`TreeArena::find`], so duplicates resolve to
    /// their first pre-order match. A node is not its own ancestor: asking for
    /// the same name twice yields its parent, and the root has no common
    /// ancestor with anything (`Ok(None)`).
    ///
    /// # Errors
    /// `NoSuchNode` if either name is not in the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn most_recent_common_ancestor(
        &self,
        name1: &str,
        name2: &str,
    ) -> TreeResult<Option<Index>> {
        let node1 = self
            .find(name1)
            .ok_or_else(|| DomainError::NoSuchNode(name1.to_string()))?;
        let node2 = self
            .find(name2)
            .ok_or_else(|| DomainError::NoSuchNode(name2.to_string()))?;

        let ancestors_of_1 = self.collect_ancestors(node1);
        let ancestors_of_2 = self.collect_ancestors(node2);
        debug!(
            "{} has {} ancestors, {} has {}",
            name1,
            ancestors_of_1.len(),
            name2,
            ancestors_of_2.len()
        );

        // Nearest-first, so the first shared index is the deepest one
        Ok(ancestors_of_1
            .into_iter()
            .find(|candidate| ancestors_of_2.contains(candidate)))
    }
}
