//! # inject-lint-rules
//!
//! Built-in lint rules for inject-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | IL001 | `explicit-injectable-provided-in` | Requires an explicit `providedIn` on `@Injectable` classes |
//!
//! ## Usage
//!
//! ```ignore
//! use inject_lint_core::Analyzer;
//! use inject_lint_rules::ExplicitInjectableProvidedIn;
//! use inject_lint_ts::TypeScriptParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(TypeScriptParser::new())
//!     .rule(ExplicitInjectableProvidedIn::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod explicit_injectable_provided_in;
mod presets;

pub use explicit_injectable_provided_in::{
    ExplicitInjectableProvidedIn, ExplicitInjectableProvidedInOptions, PolicyConfig,
};
pub use presets::{all_rules, configured_rules, recommended_rules, strict_rules, Preset};

/// Re-export core types for convenience.
pub use inject_lint_core::{Rule, Severity, Violation};

/// Errors raised while turning configuration into rules.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// Options could not be read from the configuration.
    #[error(transparent)]
    Config(#[from] inject_lint_core::ConfigError),

    /// A class-name pattern does not compile.
    #[error("Invalid pattern `{pattern}` for rule `{rule}`: {source}")]
    Pattern {
        /// Rule name.
        rule: &'static str,
        /// The offending option value.
        pattern: String,
        /// Regex compiler error.
        source: regex::Error,
    },

    /// The configured preset does not exist.
    #[error("Unknown preset `{0}` (expected `recommended` or `strict`)")]
    UnknownPreset(String),
}
