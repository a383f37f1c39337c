//! Structural selectors and listener dispatch over a [`SyntaxTree`].
//!
//! A [`Selector`] is a predicate on a single node, built as an expression
//! tree of node-kind tests, text tests, relative navigation and boolean
//! combinators. [`Listeners`] pairs selectors with handlers and drives one
//! document-order traversal.
//!
//! ```ignore
//! use inject_lint_core::query::{Selector, Step};
//!
//! // decorator > call_expression[function.text = "Injectable"]
//! let sel = Selector::kind("decorator").and(Selector::at(
//!     [Step::NamedChild(0)],
//!     Selector::kind("call_expression")
//!         .and(Selector::field("function", Selector::text("Injectable"))),
//! ));
//! let hits: Vec<_> = sel.find_all(&tree).collect();
//! ```

use regex::Regex;

use crate::tree::{NodeRef, SyntaxTree};

/// One navigation step of a [`Selector::At`] path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// First child stored under this field name.
    Field(&'static str),
    /// N-th named child, comments skipped.
    NamedChild(usize),
}

/// A structural predicate over one node.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Node kind equals.
    Kind(&'static str),
    /// Node source text equals.
    Text(String),
    /// Node source text matches the regex.
    TextMatches(Regex),
    /// Exact number of named, non-extra children.
    NamedChildCount(usize),
    /// Navigate along `path`, then test the node reached. False when the path
    /// does not resolve.
    At {
        /// Navigation steps from the tested node.
        path: Vec<Step>,
        /// Predicate for the node at the end of the path.
        selector: Box<Selector>,
    },
    /// The parent matches.
    Parent(Box<Selector>),
    /// Some ancestor matches.
    Ancestor(Box<Selector>),
    /// Some proper descendant matches.
    Has(Box<Selector>),
    /// Every operand matches. Empty is true.
    All(Vec<Selector>),
    /// At least one operand matches. Empty is false.
    AnyOf(Vec<Selector>),
    /// The operand does not match.
    Not(Box<Selector>),
}

impl Selector {
    /// Matches every node.
    #[must_use]
    pub fn always() -> Self {
        Self::All(Vec::new())
    }

    /// Matches no node.
    #[must_use]
    pub fn never() -> Self {
        Self::AnyOf(Vec::new())
    }

    /// Node kind test.
    #[must_use]
    pub fn kind(kind: &'static str) -> Self {
        Self::Kind(kind)
    }

    /// Any of several node kinds.
    #[must_use]
    pub fn kinds(kinds: &[&'static str]) -> Self {
        Self::AnyOf(kinds.iter().map(|&k| Self::Kind(k)).collect())
    }

    /// Exact text test.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Regex text test.
    #[must_use]
    pub fn text_matches(regex: Regex) -> Self {
        Self::TextMatches(regex)
    }

    /// Navigate then test.
    #[must_use]
    pub fn at(path: impl IntoIterator<Item = Step>, selector: Selector) -> Self {
        Self::At {
            path: path.into_iter().collect(),
            selector: Box::new(selector),
        }
    }

    /// Shorthand for a single [`Step::Field`] navigation.
    #[must_use]
    pub fn field(name: &'static str, selector: Selector) -> Self {
        Self::at([Step::Field(name)], selector)
    }

    /// Parent test.
    #[must_use]
    pub fn parent(selector: Selector) -> Self {
        Self::Parent(Box::new(selector))
    }

    /// Ancestor test.
    #[must_use]
    pub fn ancestor(selector: Selector) -> Self {
        Self::Ancestor(Box::new(selector))
    }

    /// Descendant test.
    #[must_use]
    pub fn has(selector: Selector) -> Self {
        Self::Has(Box::new(selector))
    }

    /// Conjunction, flattening nested `All`s.
    #[must_use]
    pub fn and(self, other: Selector) -> Self {
        match (self, other) {
            (Self::All(mut a), Self::All(b)) => {
                a.extend(b);
                Self::All(a)
            }
            (Self::All(mut a), other) => {
                a.push(other);
                Self::All(a)
            }
            (this, other) => Self::All(vec![this, other]),
        }
    }

    /// Disjunction, flattening nested `AnyOf`s.
    #[must_use]
    pub fn or(self, other: Selector) -> Self {
        match (self, other) {
            (Self::AnyOf(mut a), Self::AnyOf(b)) => {
                a.extend(b);
                Self::AnyOf(a)
            }
            (Self::AnyOf(mut a), other) => {
                a.push(other);
                Self::AnyOf(a)
            }
            (this, other) => Self::AnyOf(vec![this, other]),
        }
    }

    /// Tests a single node.
    #[must_use]
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        match self {
            Self::Kind(kind) => node.kind() == *kind,
            Self::Text(text) => node.text() == text.as_str(),
            Self::TextMatches(regex) => regex.is_match(node.text()),
            Self::NamedChildCount(count) => node.named_child_count() == *count,
            Self::At { path, selector } => resolve(node, path).is_some_and(|n| selector.matches(n)),
            Self::Parent(selector) => node.parent().is_some_and(|p| selector.matches(p)),
            Self::Ancestor(selector) => node.ancestors().any(|a| selector.matches(a)),
            Self::Has(selector) => node.descendants().any(|d| selector.matches(d)),
            Self::All(selectors) => selectors.iter().all(|s| s.matches(node)),
            Self::AnyOf(selectors) => selectors.iter().any(|s| s.matches(node)),
            Self::Not(selector) => !selector.matches(node),
        }
    }

    /// Lazily yields every matching node of `tree` in document order.
    ///
    /// The yielded nodes borrow only the tree, so they outlive the selector.
    pub fn find_all<'a, 't: 'a>(&'a self, tree: &'t SyntaxTree) -> impl Iterator<Item = NodeRef<'t>> + 'a {
        tree.nodes().filter(move |node| self.matches(*node))
    }
}

impl std::ops::Not for Selector {
    type Output = Selector;

    fn not(self) -> Self::Output {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }
}

/// Follows `path` from `node`.
#[must_use]
pub fn resolve<'t>(node: NodeRef<'t>, path: &[Step]) -> Option<NodeRef<'t>> {
    path.iter().try_fold(node, |current, step| match step {
        Step::Field(name) => current.child_by_field(name),
        Step::NamedChild(index) => current.named_child(*index),
    })
}

type Handler<'h, C> = Box<dyn for<'t> Fn(NodeRef<'t>, &mut C) + 'h>;

/// Selector-to-handler registrations driven by one traversal.
///
/// Handlers run in registration order for each node, nodes in document
/// order. `C` is the sink handlers write into.
pub struct Listeners<'h, C> {
    entries: Vec<(Selector, Handler<'h, C>)>,
}

impl<'h, C> Default for Listeners<'h, C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<'h, C> Listeners<'h, C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for nodes matching `selector`.
    #[must_use]
    pub fn on<F>(mut self, selector: Selector, handler: F) -> Self
    where
        F: for<'t> Fn(NodeRef<'t>, &mut C) + 'h,
    {
        self.entries.push((selector, Box::new(handler)));
        self
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visits every node once and returns the number of handler calls.
    pub fn run(&self, tree: &SyntaxTree, sink: &mut C) -> usize {
        let mut calls = 0;
        for node in tree.nodes() {
            for (selector, handler) in &self.entries {
                if selector.matches(node) {
                    handler(node, sink);
                    calls += 1;
                }
            }
        }
        calls
    }
}
