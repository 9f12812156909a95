//! Path-segment exclusion filter applied while walking the plugin folder.

use std::collections::HashSet;
use std::path::{Component, Path};

/// Names left out of every archive by default
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".gitignore",
    "__pycache__",
    ".DS_Store",
    "Thumbs.db",
    "node_modules",
    ".vscode",
    ".idea",
];

/// Set of literal path-segment names that must never reach the archive.
///
/// A path is excluded as soon as any one of its segments is in the set, so
/// an excluded directory takes its whole subtree with it.
#[derive(Debug, Clone)]
pub struct Excludes {
    names: HashSet<String>,
}

impl Excludes {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Default set extended with `extra`
    pub fn with_defaults(extra: &[String]) -> Self {
        Self::new(
            DEFAULT_EXCLUDES
                .iter()
                .map(|s| s.to_string())
                .chain(extra.iter().cloned()),
        )
    }

    /// Decide whether a path relative to the plugin folder belongs in the archive
    pub fn is_included(&self, relative: &Path) -> bool {
        relative.components().all(|component| match component {
            Component::Normal(segment) => {
                let segment = segment.to_string_lossy();
                // Windows-style separators inside a segment on unix
                segment
                    .split(['/', '\\'])
                    .all(|part| !self.names.contains(part))
            }
            _ => true,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
