//! Compiling one ignore entry into a path matcher.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// A compiled, immutable matcher over root-relative path strings.
///
/// Candidates carry a trailing `/` when they are directories. The matcher
/// follows gitignore wildcard rules: `*` and `?` never cross the separator,
/// `**` does, character classes and `\` escapes are honored, entries
/// without a separator match at any depth, entries containing one are
/// anchored at the root, and a trailing separator restricts the entry to
/// directories.
#[derive(Debug)]
pub struct CompiledPattern {
    matcher: Gitignore,
}

impl CompiledPattern {
    /// Test a root-relative path (trailing `/` marks a directory).
    ///
    /// Negated entries never report a match here; navigating a whitelist
    /// line to the files it un-ignores is not supported.
    pub fn is_match(&self, relative: &str) -> bool {
        let is_dir = relative.ends_with('/');
        let candidate = relative.strip_suffix('/').unwrap_or(relative);
        if candidate.is_empty() {
            return false;
        }
        self.matcher.matched(Path::new(candidate), is_dir).is_ignore()
    }
}

/// Compile `text` into a pattern, or `None` when the text cannot act as one
/// (blank lines, comments, invalid globs). A missing pattern matches
/// nothing; compilation never fails the caller.
pub fn compile(text: &str, case_sensitive: bool) -> Option<CompiledPattern> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut builder = GitignoreBuilder::new("");
    if let Err(err) = builder.case_insensitive(!case_sensitive) {
        tracing::debug!(error = %err, "failed to toggle matcher case sensitivity");
        return None;
    }
    if let Err(err) = builder.add_line(None, trimmed) {
        tracing::debug!(pattern = trimmed, error = %err, "uncompilable ignore pattern");
        return None;
    }
    let matcher = match builder.build() {
        Ok(matcher) => matcher,
        Err(err) => {
            tracing::debug!(pattern = trimmed, error = %err, "failed to build matcher");
            return None;
        }
    };
    if matcher.is_empty() {
        return None;
    }

    Some(CompiledPattern { matcher })
}
