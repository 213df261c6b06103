//! Orchestrating segment resolution against the filesystem.

use std::path::Path;

use crate::app::split;
use crate::app::walk::TreeWalker;
use crate::domain::model::{EntryLine, ResolvedLine, ResolvedSegment};
use crate::infra::fs::{self, FilesystemAccess};
use crate::infra::glob;

/// Options controlling one resolution pass.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub separator: String,
    pub case_sensitive: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            separator: "/".to_owned(),
            case_sensitive: fs::default_case_sensitivity(),
        }
    }
}

/// Resolves ignore entries to the filesystem items they refer to.
pub struct Resolver<'a, F: FilesystemAccess> {
    fs: &'a F,
    options: ResolveOptions,
}

impl<'a, F: FilesystemAccess> Resolver<'a, F> {
    pub fn new(fs: &'a F, options: ResolveOptions) -> Self {
        Self { fs, options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve one entry against the directory that owns the ignore file.
    ///
    /// Every segment gets an exact name-based lookup of its cumulative text.
    /// The final segment additionally falls back to pattern matching: the
    /// entire original entry text is compiled (so a trailing separator keeps
    /// its directory-only meaning) and the owning directory's tree is walked
    /// for matches, which are appended to the exact results rather than
    /// replacing them. `owner_directory` of `None` models a rootless ignore
    /// file; both lookups need the context, so all segments resolve empty.
    pub fn resolve_line(&self, line: &EntryLine, owner_directory: Option<&Path>) -> ResolvedLine {
        let segments = split::split(&line.text, line.offset, &self.options.separator);
        let last_index = segments.len().saturating_sub(1);

        let mut resolved = Vec::with_capacity(segments.len());
        for segment in segments {
            let mut matches = Vec::new();

            if let Some(owner) = owner_directory {
                matches.extend(self.fs.resolve_exact(
                    owner,
                    &segment.text,
                    &self.options.separator,
                    self.options.case_sensitive,
                ));

                if segment.index == last_index
                    && let Some(pattern) = glob::compile(&line.text, self.options.case_sensitive)
                {
                    let walked =
                        TreeWalker::new(self.fs).walk(owner, owner, &pattern, segment.index);
                    matches.extend(walked.matches.into_iter().map(|m| m.item));
                } else if segment.index == last_index {
                    tracing::debug!(entry = %line.text, "entry has no usable pattern");
                }
            }

            resolved.push(ResolvedSegment { segment, matches });
        }

        ResolvedLine { segments: resolved }
    }

    /// Trailing-separator-aware accessor for the entry's final segment.
    pub fn last_meaningful<'r>(&self, line: &'r ResolvedLine) -> Option<&'r ResolvedSegment> {
        line.last_meaningful(&self.options.separator)
    }
}
