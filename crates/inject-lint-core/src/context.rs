//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::tree::{Span, SyntaxTree};
use crate::types::Location;

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root, used in reported locations.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Builds a reported [`Location`] for a span of `tree`.
    #[must_use]
    pub fn location(&self, tree: &SyntaxTree, span: Span) -> Location {
        let position = tree.position(span.start);
        Location::new(self.relative_path.clone(), position.line, position.column)
            .with_span(span.start, span.len())
    }
}
