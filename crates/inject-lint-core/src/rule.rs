//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::tree::SyntaxTree;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a parsed [`SyntaxTree`].
///
/// Rules usually register [`crate::query::Listeners`] and run them over the
/// tree.
///
/// # Example
///
/// ```ignore
/// use inject_lint_core::query::{Listeners, Selector};
/// use inject_lint_core::{FileContext, Rule, Severity, SyntaxTree, Violation};
///
/// pub struct NoEmptyClass;
///
/// impl Rule for NoEmptyClass {
///     fn name(&self) -> &'static str { "no-empty-class" }
///     fn code(&self) -> &'static str { "IL900" }
///
///     fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
///         let body = Selector::kind("class_body").and(Selector::NamedChildCount(0));
///         let mut out = Vec::new();
///         Listeners::new()
///             .on(body, |node, out: &mut Vec<Violation>| {
///                 out.push(Violation::new(
///                     self.code(),
///                     self.name(),
///                     Severity::Warning,
///                     ctx.location(tree, node.span()),
///                     "Empty class",
///                 ));
///             })
///             .run(tree, &mut out);
///         out
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "explicit-injectable-provided-in").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "IL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
