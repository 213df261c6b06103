//! Enumerating the resolvable entries of an ignore document.

use std::fs;
use std::path::Path;

use crate::domain::errors::ResolveError;
use crate::domain::model::EntryLine;

/// An ignore document held in memory.
///
/// Blank lines and `#` comments are not entries; everything else is,
/// negated (`!`) lines included — they are real entries even though their
/// patterns never match anything here. Offsets are absolute byte positions
/// within the document, so segment ranges can point back into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreDocument {
    text: String,
}

impl IgnoreDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let text = fs::read_to_string(path).map_err(|source| ResolveError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Entries in document order.
    ///
    /// Entry text keeps leading whitespace (the splitter accounts for it)
    /// but drops trailing whitespace and the line terminator.
    pub fn entries(&self) -> Vec<EntryLine> {
        let mut entries = Vec::new();
        let mut offset = 0;
        for raw in self.text.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                entries.push(EntryLine::new(line.trim_end(), offset));
            }
            offset += raw.len() + 1;
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines_and_comments() {
        let doc = IgnoreDocument::new("# header\n\n*.class\n\nbuild/\n# trailing\n");
        let entries = doc.entries();
        assert_eq!(
            entries.iter().map(|e| e.text.as_str()).collect::<Vec<_>>(),
            vec!["*.class", "build/"]
        );
    }

    #[test]
    fn offsets_are_document_absolute() {
        let doc = IgnoreDocument::new("# header\n*.class\nbuild/\n");
        let entries = doc.entries();
        assert_eq!(entries[0].offset, 9);
        assert_eq!(entries[1].offset, 17);
        assert_eq!(&doc.text()[entries[0].offset..entries[0].offset + 7], "*.class");
    }

    #[test]
    fn keeps_leading_whitespace_and_drops_line_endings() {
        let doc = IgnoreDocument::new("  spaced\r\nnext\n");
        let entries = doc.entries();
        assert_eq!(entries[0].text, "  spaced");
        assert_eq!(entries[1].text, "next");
        assert_eq!(entries[1].offset, 10);
    }

    #[test]
    fn document_without_trailing_newline() {
        let doc = IgnoreDocument::new("last");
        let entries = doc.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].offset, 0);
    }

    #[test]
    fn load_reports_unreadable_files() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("absent");
        let err = IgnoreDocument::load(&missing).unwrap_err();
        assert!(err.to_string().contains("absent"));
    }
}
