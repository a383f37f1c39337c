//! Candidate edits setting `providedIn`.
//!
//! One candidate per accepted value, in suggestion order. An existing entry
//! has its value replaced; otherwise a new entry is inserted into the
//! decorator call. A candidate without edit means no safe insertion point
//! was found.

use inject_lint_core::{NodeRef, Span};

use super::metadata::{ClassCandidate, PROVIDED_IN};
use super::policy::{AcceptedValue, PolicyConfig};

/// A single text replacement. Empty spans insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Replaced range.
    pub span: Span,
    /// Replacement text.
    pub text: String,
}

impl TextEdit {
    fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(Span::empty(offset), text)
    }

    /// Applies the edit to `source`.
    #[must_use]
    pub fn apply(&self, source: &str) -> Option<String> {
        let before = source.get(..self.span.start)?;
        let after = source.get(self.span.end..)?;
        Some(format!("{before}{}{after}", self.text))
    }
}

/// One proposed fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixCandidate {
    /// Value the fix sets.
    pub value: AcceptedValue,
    /// Label shown to the user.
    pub label: String,
    /// The edit, if a safe one exists.
    pub edit: Option<TextEdit>,
}

/// Builds the alternatives for a reported candidate.
#[must_use]
pub fn fix_candidates(candidate: &ClassCandidate<'_>, policy: &PolicyConfig) -> Vec<FixCandidate> {
    policy
        .accepted_values()
        .iter()
        .map(|&value| FixCandidate {
            value,
            label: format!("Use `{PROVIDED_IN}: {}`", value.source_text()),
            edit: edit_for(candidate, value),
        })
        .collect()
}

fn edit_for(candidate: &ClassCandidate<'_>, value: AcceptedValue) -> Option<TextEdit> {
    let literal = value.source_text();

    if let Some(field) = &candidate.field {
        return Some(if field.shorthand {
            TextEdit::replace(field.entry.span(), format!("{PROVIDED_IN}: {literal}"))
        } else {
            TextEdit::replace(field.value.span(), literal)
        });
    }

    let arguments = candidate.arguments?;
    if !candidate.annotation_has_arguments() {
        let open = token(arguments, "(")?;
        return Some(TextEdit::insert(
            open.span().end,
            format!("{{ {PROVIDED_IN}: {literal} }}"),
        ));
    }

    let object = candidate.metadata_object?;
    let entry = format!("{PROVIDED_IN}: {literal}");
    if let Some(last) = object.named_children().last() {
        return Some(TextEdit::insert(last.span().end, format!(", {entry}")));
    }

    let open = token(object, "{")?;
    let close = token(object, "}")?;
    let inner = object
        .tree()
        .source()
        .get(open.span().end..close.span().start)?;
    let text = if inner.is_empty() {
        format!(" {entry} ")
    } else {
        format!(" {entry}")
    };
    Some(TextEdit::insert(open.span().end, text))
}

fn token<'t>(node: NodeRef<'t>, kind: &str) -> Option<NodeRef<'t>> {
    node.children().find(|c| !c.is_named() && c.kind() == kind)
}
