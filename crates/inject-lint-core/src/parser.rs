//! Source parser abstraction.

use crate::tree::{SyntaxTree, TreeError};

/// Converts source text of one language into a [`SyntaxTree`].
pub trait SourceParser: Send + Sync {
    /// Short language identifier, e.g. "typescript".
    fn language_id(&self) -> &'static str;

    /// File extensions (without the dot) this parser handles.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the source contains
    /// syntax errors.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;

    /// Returns true if this parser handles files with `extension`.
    fn handles(&self, extension: &str) -> bool {
        self.extensions().contains(&extension)
    }
}

/// Type alias for boxed parsers.
pub type ParserBox = Box<dyn SourceParser>;

/// Errors produced while parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader message.
        message: String,
    },

    /// The parser produced no tree (cancelled or timed out).
    #[error("parser produced no tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error node (1-indexed).
        line: usize,
        /// Column of the first error node (1-indexed).
        column: usize,
    },

    /// The parsed tree could not be converted.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
