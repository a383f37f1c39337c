//! # inject-lint-core
//!
//! Core framework for linting decorated TypeScript classes over an owned
//! syntax tree.
//!
//! This crate provides the foundational traits and types:
//!
//! - [`SyntaxTree`] and [`NodeRef`], an arena tree in document order
//! - [`query::Selector`] and [`query::Listeners`] for structural matching
//! - [`SourceParser`] for plugging in a concrete grammar
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings and their suggested fixes
//!
//! ## Example
//!
//! ```ignore
//! use inject_lint_core::Analyzer;
//! use inject_lint_ts::TypeScriptParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(TypeScriptParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod rule;
mod types;

/// Structural selectors and listener dispatch.
pub mod query;
/// Owned syntax tree.
pub mod tree;
/// Utility modules shared by the analyzer and rules.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use parser::{ParseError, ParserBox, SourceParser};
pub use rule::{Rule, RuleBox};
pub use tree::{NodeId, NodeRef, Position, Span, SyntaxTree, TreeBuilder, TreeError};
pub use types::{
    Label, LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
