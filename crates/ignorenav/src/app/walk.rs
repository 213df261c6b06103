//! Recursive pattern-driven directory walking.

use std::path::Path;

use crate::domain::model::MatchResult;
use crate::infra::fs::FilesystemAccess;
use crate::infra::glob::CompiledPattern;

/// Depth-first, pre-order walker collecting every entry under a root whose
/// root-relative path matches a compiled pattern.
///
/// Every non-symlink directory is entered whether or not it matched, so
/// even a single-component wildcard like `*.class` reaches matches at any
/// depth; this mirrors how ignore entries apply to whole subtrees and is
/// deliberate. Symbolic links are match candidates but are never descended
/// into, which keeps cyclic link structures from recursing forever.
pub struct TreeWalker<'a, F: FilesystemAccess> {
    fs: &'a F,
}

impl<'a, F: FilesystemAccess> TreeWalker<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Walk `directory`, matching against paths relative to `root`, tagging
    /// every match with the index of the segment that produced the pattern.
    pub fn walk(
        &self,
        root: &Path,
        directory: &Path,
        pattern: &CompiledPattern,
        segment: usize,
    ) -> MatchResult {
        let mut result = MatchResult::default();
        self.walk_into(root, directory, pattern, segment, &mut result);
        result
    }

    fn walk_into(
        &self,
        root: &Path,
        directory: &Path,
        pattern: &CompiledPattern,
        segment: usize,
        result: &mut MatchResult,
    ) {
        for child in self.fs.list_children(directory) {
            if let Some(relative) = self.fs.relative_path(root, &child)
                && pattern.is_match(&relative)
            {
                match self.fs.to_item(&child.path) {
                    Some(item) => result.push(item, segment),
                    None => {
                        tracing::debug!(path = %child.path.display(), "entry vanished during walk");
                    }
                }
            }

            if child.is_dir && !child.is_symlink {
                self.walk_into(root, &child.path, pattern, segment, result);
            }
        }
    }
}
