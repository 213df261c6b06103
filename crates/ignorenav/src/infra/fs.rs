//! Filesystem access behind a small capability interface.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::model::{FsItem, FsItemKind};

/// One directory child as reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Minimal filesystem capability consumed by the walker and resolver.
///
/// Implementations report children in enumeration order; callers must not
/// assume any sorting. Entries that cannot be inspected (racing deletes,
/// permission errors) are omitted rather than reported as failures.
pub trait FilesystemAccess {
    /// Immediate children of `directory`, in enumeration order.
    fn list_children(&self, directory: &Path) -> Vec<ChildEntry>;

    /// Resolve a path to a live filesystem item, if it still exists.
    fn to_item(&self, path: &Path) -> Option<FsItem>;

    /// `item`'s path relative to `root`, `/`-separated, with a trailing `/`
    /// when the item is a directory. `None` when the item is the root itself
    /// or lies outside it.
    fn relative_path(&self, root: &Path, item: &ChildEntry) -> Option<String> {
        let relative = item.path.strip_prefix(root).ok()?;
        let mut joined = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if joined.is_empty() {
            return None;
        }
        if item.is_dir {
            joined.push('/');
        }
        Some(joined)
    }

    /// Standard name-based lookup of `text` against `context`.
    ///
    /// `text` is a separator-joined relative path; empty components (from a
    /// leading or doubled separator) are skipped, and text that is empty
    /// after trimming resolves to nothing. Case-insensitive lookups compare
    /// names by case folding and may return more than one item when a
    /// case-sensitive filesystem holds several candidates.
    fn resolve_exact(
        &self,
        context: &Path,
        text: &str,
        separator: &str,
        case_sensitive: bool,
    ) -> Vec<FsItem> {
        let text = text.trim_start();
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut contexts = match self.to_item(context) {
            Some(item) if item.is_directory() => vec![item],
            _ => return Vec::new(),
        };

        for component in text.split(separator).filter(|c| !c.is_empty()) {
            let mut next = Vec::new();
            for ctx in &contexts {
                if !ctx.is_directory() {
                    continue;
                }
                for child in self.list_children(&ctx.path) {
                    let hit = if case_sensitive {
                        child.name == component
                    } else {
                        child.name.to_lowercase() == component.to_lowercase()
                    };
                    if hit && let Some(item) = self.to_item(&child.path) {
                        next.push(item);
                    }
                }
            }
            contexts = next;
            if contexts.is_empty() {
                break;
            }
        }

        contexts
    }
}

/// Production implementation over `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FilesystemAccess for RealFileSystem {
    fn list_children(&self, directory: &Path) -> Vec<ChildEntry> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(dir = %directory.display(), error = %err, "failed to enumerate directory");
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().into_owned();
                let file_type = entry.file_type().ok()?;
                let is_symlink = file_type.is_symlink();
                // A link to a directory counts as a directory for matching,
                // even though it is never entered.
                let is_dir = if is_symlink {
                    fs::metadata(&path).map(|meta| meta.is_dir()).unwrap_or(false)
                } else {
                    file_type.is_dir()
                };
                Some(ChildEntry {
                    path,
                    name,
                    is_dir,
                    is_symlink,
                })
            })
            .collect()
    }

    fn to_item(&self, path: &Path) -> Option<FsItem> {
        // Fall back to the link's own metadata so dangling symlinks still
        // resolve to an item.
        let meta = fs::metadata(path)
            .or_else(|_| fs::symlink_metadata(path))
            .ok()?;
        let kind = if meta.is_dir() {
            FsItemKind::Directory
        } else {
            FsItemKind::File
        };
        Some(FsItem {
            path: path.to_path_buf(),
            kind,
        })
    }
}

/// Whether the host filesystem is assumed case-sensitive.
///
/// Platform default only; probing the actual mount would require write
/// access. Configuration can override the answer.
pub fn default_case_sensitivity() -> bool {
    !(cfg!(windows) || cfg!(target_os = "macos"))
}


#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn lists_children_with_kinds() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("a.txt"), b"a").unwrap();

        let children = RealFileSystem.list_children(temp.path());
        assert_eq!(children.len(), 2);

        let sub = children.iter().find(|c| c.name == "sub").unwrap();
        assert!(sub.is_dir);
        assert!(!sub.is_symlink);

        let file = children.iter().find(|c| c.name == "a.txt").unwrap();
        assert!(!file.is_dir);
    }

    #[cfg(unix)]
    #[test]
    fn flags_symlinked_directories() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("target")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("target"), temp.path().join("link")).unwrap();

        let children = RealFileSystem.list_children(temp.path());
        let link = children.iter().find(|c| c.name == "link").unwrap();
        assert!(link.is_symlink);
        assert!(link.is_dir);
    }

    #[test]
    fn relative_path_appends_slash_for_directories() {
        let fs = RealFileSystem;
        let dir = ChildEntry {
            path: PathBuf::from("/proj/src/nested"),
            name: "nested".into(),
            is_dir: true,
            is_symlink: false,
        };
        assert_eq!(
            fs.relative_path(Path::new("/proj"), &dir).as_deref(),
            Some("src/nested/")
        );

        let file = ChildEntry {
            path: PathBuf::from("/proj/src/lib.rs"),
            name: "lib.rs".into(),
            is_dir: false,
            is_symlink: false,
        };
        assert_eq!(
            fs.relative_path(Path::new("/proj"), &file).as_deref(),
            Some("src/lib.rs")
        );
    }

    #[test]
    fn relative_path_rejects_outsiders_and_root() {
        let fs = RealFileSystem;
        let outside = ChildEntry {
            path: PathBuf::from("/other/file"),
            name: "file".into(),
            is_dir: false,
            is_symlink: false,
        };
        assert!(fs.relative_path(Path::new("/proj"), &outside).is_none());

        let root = ChildEntry {
            path: PathBuf::from("/proj"),
            name: "proj".into(),
            is_dir: true,
            is_symlink: false,
        };
        assert!(fs.relative_path(Path::new("/proj"), &root).is_none());
    }

    #[test]
    fn resolve_exact_walks_nested_components() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src/nested")).unwrap();
        fs::write(temp.path().join("src/lib.rs"), b"x").unwrap();

        let items = RealFileSystem.resolve_exact(temp.path(), "src/lib.rs", "/", true);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "lib.rs");
        assert!(!items[0].is_directory());
    }

    #[test]
    fn resolve_exact_is_case_aware() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("Src")).unwrap();

        let sensitive = RealFileSystem.resolve_exact(temp.path(), "src", "/", true);
        assert!(sensitive.is_empty());

        let insensitive = RealFileSystem.resolve_exact(temp.path(), "src", "/", false);
        assert_eq!(insensitive.len(), 1);
        assert_eq!(insensitive[0].name(), "Src");
    }

    #[test]
    fn resolve_exact_skips_empty_components() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();

        let items = RealFileSystem.resolve_exact(temp.path(), "/src", "/", true);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "src");
    }

    #[test]
    fn resolve_exact_of_blank_text_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        assert!(RealFileSystem.resolve_exact(temp.path(), "", "/", true).is_empty());
        assert!(
            RealFileSystem
                .resolve_exact(temp.path(), "   ", "/", true)
                .is_empty()
        );
    }

    #[test]
    fn to_item_misses_deleted_paths() {
        let temp = tempfile::tempdir().unwrap();
        assert!(RealFileSystem.to_item(&temp.path().join("missing")).is_none());

        let item = RealFileSystem.to_item(temp.path()).unwrap();
        assert!(item.is_directory());
    }
}
