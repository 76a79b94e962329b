//! Family tree service
//!
//! Loads a tree from a line source and answers ancestor queries by name.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DomainError, TreeArena, TreeBuilder};
use crate::infrastructure::LineSource;

/// Result of an MRCA query, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrcaOutcome {
    pub first: String,
    pub second: String,
    /// Name of the most recent common ancestor, None if there is none
    pub ancestor: Option<String>,
}

impl fmt::Display for MrcaOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ancestor {
            Some(name) => write!(
                f,
                "Most recent common ancestor of {} and {} is {}",
                self.first, self.second, name
            ),
            None => write!(
                f,
                "{} and {} have no common ancestor",
                self.first, self.second
            ),
        }
    }
}

/// Service for loading family trees and querying them.
pub struct FamilyTreeService {
    extension: String,
}

impl Default for FamilyTreeService {
    fn default() -> Self {
        Self::new("txt")
    }
}

impl FamilyTreeService {
    /// Create a service that looks for tree files with `extension`.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Load a complete tree from `source`.
    ///
    /// The source is released before returning, on success and on error.
    #[instrument(level = "debug", skip(self, source), fields(source = %source))]
    pub fn load(&self, source: &dyn LineSource) -> ApplicationResult<TreeArena> {
        let mut builder = TreeBuilder::new();
        self.load_into(&mut builder, source)?;
        let tree = builder.finish();
        info!("loaded {} nodes from {}", tree.len(), source);
        Ok(tree)
    }

    /// Feed every line of `source` into `builder`, stopping at the first error.
    ///
    /// On error the builder keeps whatever the earlier lines produced.
    pub fn load_into(
        &self,
        builder: &mut TreeBuilder,
        source: &dyn LineSource,
    ) -> ApplicationResult<()> {
        let lines = source.open_lines().with_source_context("open", source)?;
        for line in lines {
            let line = line.with_source_context("read", source)?;
            builder.add_line(&line)?;
        }
        debug!("ingested {} lines from {}", builder.lines_read(), source);
        Ok(())
    }

    /// Most recent common ancestor of `first` and `second`.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn mrca(
        &self,
        tree: &TreeArena,
        first: &str,
        second: &str,
    ) -> ApplicationResult<MrcaOutcome> {
        let ancestor = tree
            .most_recent_common_ancestor(first, second)?
            .and_then(|idx| tree.name(idx))
            .map(str::to_string);
        Ok(MrcaOutcome {
            first: first.to_string(),
            second: second.to_string(),
            ancestor,
        })
    }

    /// Names of the ancestors of `name`, nearest first.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn ancestors(&self, tree: &TreeArena, name: &str) -> ApplicationResult<Vec<String>> {
        let idx = tree
            .find(name)
            .ok_or_else(|| DomainError::NoSuchNode(name.to_string()))?;
        Ok(tree
            .collect_ancestors(idx)
            .into_iter()
            .filter_map(|a| tree.name(a).map(str::to_string))
            .collect())
    }

    /// All tree files below `dir`, sorted by path.
    #[instrument(level = "debug", skip(self))]
    pub fn find_tree_files(&self, dir: &Path) -> ApplicationResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| {
                let context = format!("walk {}", dir.display());
                match e.into_io_error() {
                    Some(io) => ApplicationError::read(context, io),
                    None => ApplicationError::read(
                        context,
                        std::io::Error::other("filesystem loop"),
                    ),
                }
            })?;
            if entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == self.extension.as_str())
            {
                files.push(entry.into_path());
            }
        }
        files.sort();
        debug!("found {} tree files in {}", files.len(), dir.display());
        Ok(files)
    }

    /// First tree file below `dir`, for runs without an explicit file.
    pub fn default_tree_file(&self, dir: &Path) -> ApplicationResult<PathBuf> {
        self.find_tree_files(dir)?
            .into_iter()
            .next()
            .ok_or_else(|| ApplicationError::NoTreeFile {
                dir: dir.to_path_buf(),
                extension: self.extension.clone(),
            })
    }
}
