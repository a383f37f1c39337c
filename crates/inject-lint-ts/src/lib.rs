//! # inject-lint-ts
//!
//! Tree-sitter based TypeScript front end for inject-lint.
//!
//! [`TypeScriptParser`] implements [`inject_lint_core::SourceParser`] and
//! copies the Tree-sitter tree into an owned
//! [`inject_lint_core::SyntaxTree`], keeping node kinds, field names and
//! byte spans as the grammar defines them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod typescript;

pub use typescript::{Dialect, TypeScriptParser};
