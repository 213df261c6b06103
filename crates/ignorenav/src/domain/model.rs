//! Domain models for ignore entries, path segments, and resolved matches.

use std::path::{Path, PathBuf};

/// One entry of an ignore document: the raw line text plus the absolute
/// byte offset of its first character within the owning document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine {
    pub text: String,
    pub offset: usize,
}

impl EntryLine {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }
}

/// One path component produced by splitting an entry.
///
/// `text` is cumulative: it spans from the start of the entry through this
/// component, which is how nested path references are addressed. The owning
/// [`EntryLine`] is held by the caller; a segment carries only its index and
/// document range, so it never outlives the resolution that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 0-based position within the entry, in split order.
    pub index: usize,
    /// Cumulative text from the start of the entry through this component.
    pub text: String,
    /// Absolute `(start, end)` byte offsets within the document.
    pub range: (usize, usize),
}

/// Kind of a resolved filesystem item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsItemKind {
    File,
    Directory,
}

/// A live filesystem item, tagged file-or-directory.
///
/// Callers switch on the kind only when deciding whether an item can be
/// descended into; name and path access are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsItem {
    pub path: PathBuf,
    pub kind: FsItemKind,
}

impl FsItem {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: FsItemKind::File,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: FsItemKind::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == FsItemKind::Directory
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, empty for roots.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A single item matched during a walk, tagged with the index of the
/// segment whose pattern produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkMatch {
    pub item: FsItem,
    pub segment: usize,
}

/// Matches collected by one tree walk, in traversal order.
///
/// The walker neither sorts nor deduplicates; display layers do that when
/// they need to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub matches: Vec<WalkMatch>,
}

impl MatchResult {
    pub fn push(&mut self, item: FsItem, segment: usize) {
        self.matches.push(WalkMatch { item, segment });
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WalkMatch> {
        self.matches.iter()
    }
}

/// A segment together with everything it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSegment {
    pub segment: Segment,
    pub matches: Vec<FsItem>,
}

/// All segments of one entry, each with its resolution results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLine {
    pub segments: Vec<ResolvedSegment>,
}

impl ResolvedLine {
    /// Final segment for navigation purposes.
    ///
    /// When the last segment's text ends with `separator` (a bare-separator
    /// entry), the previous segment is reported instead, or nothing if there
    /// is only one segment.
    pub fn last_meaningful(&self, separator: &str) -> Option<&ResolvedSegment> {
        let last = self.segments.last()?;
        if last.segment.text.ends_with(separator) {
            if self.segments.len() > 1 {
                return self.segments.get(self.segments.len() - 2);
            }
            return None;
        }
        Some(last)
    }
}
