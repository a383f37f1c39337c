//! Structural selectors locating `@Injectable(...)` decorators on classes.
//!
//! The top-level selector matches the `decorator` node itself. It reads as
//!
//! ```text
//! class:not(name ~ pattern):not(:has(implements HttpInterceptor)) > decorator > call[function = Injectable]
//! ```
//!
//! where the class is either the decorator's parent or the `declaration` of
//! an `export_statement` carrying the decorator. An anonymous
//! `export default class {}` sits in the statement's `value` field instead.

use inject_lint_core::query::{Selector, Step};
use regex::{Regex, RegexBuilder};

/// Decorator callee name.
pub const ANNOTATION: &str = "Injectable";

/// Interface whose implementors are never reported.
pub const SENTINEL_INTERFACE: &str = "HttpInterceptor";

/// Class declaration node kinds.
pub const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration"];

/// A class-name exclusion.
///
/// `/body/flags` is a regular expression searched anywhere in the name;
/// anything else is compared for equality.
#[derive(Debug, Clone)]
pub enum ClassNamePattern {
    /// Exact class name.
    Exact(String),
    /// Regular expression over the class name.
    Regex(Regex),
}

impl ClassNamePattern {
    /// Parses a pattern option value.
    ///
    /// Supported flags are `i`, `m`, `s` and `u` (the last is a no-op).
    ///
    /// # Errors
    ///
    /// Returns an error if the value has regex form but the body does not
    /// compile.
    pub fn parse(pattern: &str) -> Result<Self, regex::Error> {
        let Some((body, flags)) = split_regex_literal(pattern) else {
            return Ok(Self::Exact(pattern.to_string()));
        };
        let regex = RegexBuilder::new(body)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()?;
        Ok(Self::Regex(regex))
    }

    /// Returns true if `name` is excluded.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Regex(regex) => regex.is_match(name),
        }
    }

    fn selector(&self) -> Selector {
        match self {
            Self::Exact(exact) => Selector::text(exact.clone()),
            Self::Regex(regex) => Selector::text_matches(regex.clone()),
        }
    }
}

fn split_regex_literal(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    let valid_flags = flags.chars().all(|c| matches!(c, 'i' | 'm' | 's' | 'u'));
    (!body.is_empty() && valid_flags).then_some((body, flags))
}

/// Conditions that exempt a class from the rule.
#[derive(Debug, Clone, Default)]
pub struct Exclusion {
    class_name: Option<ClassNamePattern>,
}

impl Exclusion {
    /// Only the sentinel interface exempts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also exempts classes whose name matches `pattern`.
    #[must_use]
    pub fn with_class_name(mut self, pattern: ClassNamePattern) -> Self {
        self.class_name = Some(pattern);
        self
    }

    /// The class-name pattern, if any.
    #[must_use]
    pub fn class_name(&self) -> Option<&ClassNamePattern> {
        self.class_name.as_ref()
    }

    /// Selector matching exempt class declarations.
    #[must_use]
    pub fn selector(&self) -> Selector {
        let sentinel = Selector::has(implements_sentinel());
        match &self.class_name {
            Some(pattern) => Selector::field("name", pattern.selector()).or(sentinel),
            None => sentinel,
        }
    }
}

/// A type reference in an `implements` clause naming the sentinel, plain,
/// qualified, or generic.
fn implements_sentinel() -> Selector {
    let named = Selector::kind("type_identifier")
        .and(Selector::text(SENTINEL_INTERFACE))
        .or(Selector::kind("nested_type_identifier")
            .and(Selector::field("name", Selector::text(SENTINEL_INTERFACE))));
    let generic = Selector::kind("generic_type").and(Selector::field("name", named.clone()));

    Selector::parent(Selector::kind("implements_clause")).and(named.or(generic))
}

/// `decorator` whose expression calls the plain identifier `Injectable`.
#[must_use]
pub fn injectable_call() -> Selector {
    Selector::kind("decorator").and(Selector::at(
        [Step::NamedChild(0)],
        Selector::kind("call_expression").and(Selector::field(
            "function",
            Selector::kind("identifier").and(Selector::text(ANNOTATION)),
        )),
    ))
}

/// Decorator attached to a class matching `class`, directly or through an
/// `export_statement`.
#[must_use]
pub fn on_class(class: Selector) -> Selector {
    let exported = Selector::kind("export_statement").and(
        Selector::field("declaration", class.clone()).or(Selector::field("value", class.clone())),
    );
    Selector::parent(class.or(exported))
}

/// Any class declaration, including the nameless one of `export default`.
#[must_use]
pub fn class_declaration() -> Selector {
    let default_export = Selector::kind("class").and(Selector::parent(Selector::kind("export_statement")));
    Selector::kinds(CLASS_KINDS).or(default_export)
}

/// The rule's top-level selector, exclusions folded in.
#[must_use]
pub fn injectable_decorator(exclusion: &Exclusion) -> Selector {
    injectable_call().and(on_class(class_declaration().and(!exclusion.selector())))
}
