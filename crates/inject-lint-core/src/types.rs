//! Core types for lint violations and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A labeled span for additional context in violations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Location of the label.
    pub location: Location,
    /// Message for this label.
    pub message: String,
}

impl Label {
    /// Creates a new label.
    #[must_use]
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

/// A suggested fix for a violation.
///
/// Suggestions attached to one violation are alternatives: apply at most one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
    /// Edit to apply. `None` means the suggestion has no effect.
    pub replacement: Option<Replacement>,
}

impl Suggestion {
    /// Creates a new suggestion without automatic fix.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    /// Creates a new suggestion with automatic fix.
    #[must_use]
    pub fn with_fix(message: impl Into<String>, replacement: Replacement) -> Self {
        Self {
            message: message.into(),
            replacement: Some(replacement),
        }
    }

    /// Applies this suggestion to `source`.
    ///
    /// Returns `None` if the replacement span does not fit `source`. A
    /// suggestion without replacement returns `source` unchanged.
    #[must_use]
    pub fn apply(&self, source: &str) -> Option<String> {
        match &self.replacement {
            Some(replacement) => replacement.apply(source),
            None => Some(source.to_string()),
        }
    }
}

/// A textual replacement of `length` bytes at `offset`.
///
/// Zero-length replacements are insertions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    /// Location to replace.
    pub location: Location,
    /// New text to insert.
    pub new_text: String,
}

impl Replacement {
    /// Creates a new replacement.
    #[must_use]
    pub fn new(location: Location, new_text: impl Into<String>) -> Self {
        Self {
            location,
            new_text: new_text.into(),
        }
    }

    /// Applies the replacement to `source`.
    #[must_use]
    pub fn apply(&self, source: &str) -> Option<String> {
        let start = self.location.offset;
        let end = start.checked_add(self.location.length)?;
        let before = source.get(..start)?;
        let after = source.get(end..)?;
        Some(format!("{before}{}{after}", self.new_text))
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "IL001").
    pub code: String,
    /// Rule name (e.g., "explicit-injectable-provided-in").
    pub rule: String,
    /// Stable identifier of the message template (e.g., "mandatoryFieldMissing").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Alternative fixes, in preference order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    /// Additional labels for context.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    /// Reference to documentation (e.g., "docs/rules/explicit-injectable-provided-in.md").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_ref: Option<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            message_id: None,
            severity,
            location,
            message: message.into(),
            suggestions: Vec::new(),
            labels: Vec::new(),
            doc_ref: None,
        }
    }

    /// Sets the message template identifier.
    #[must_use]
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Adds a documentation reference to this violation.
    #[must_use]
    pub fn with_doc_ref(mut self, doc_ref: impl Into<String>) -> Self {
        self.doc_ref = Some(doc_ref.into());
        self
    }

    /// Appends an alternative suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Adds a label to this violation.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        for suggestion in &self.suggestions {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        if let Some(doc_ref) = &self.doc_ref {
            let _ = writeln!(output, "  = see: {doc_ref}");
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )?;
        if let Some(doc_ref) = &self.doc_ref {
            write!(f, " (see: {doc_ref})")?;
        }
        Ok(())
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        let help = (!v.suggestions.is_empty()).then(|| {
            v.suggestions
                .iter()
                .map(|s| s.message.as_str())
                .collect::<Vec<_>>()
                .join(", or ")
        });
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help,
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.rule.clone(),
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// One-line summary, e.g. `Found 1 error(s), 0 warning(s), 0 info(s) in 3 file(s)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let (errors, warnings, infos) = self.count_by_severity();
        format!(
            "Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)",
            self.files_checked
        )
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "IL001",
            "explicit-injectable-provided-in",
            severity,
            Location::new(PathBuf::from("src/app/user.service.ts"), 3, 1),
            "The `providedIn` property is mandatory for `Injectables`",
        )
    }

    fn insertion(offset: usize, text: &str) -> Replacement {
        Replacement::new(
            Location::new(PathBuf::from("a.ts"), 1, offset + 1).with_span(offset, 0),
            text,
        )
    }

    #[test]
    fn violation_new_has_no_doc_ref_or_message_id() {
        let v = make_violation(Severity::Error);
        assert!(v.doc_ref.is_none());
        assert!(v.message_id.is_none());
    }

    #[test]
    fn violation_format_lists_every_suggestion() {
        let v = make_violation(Severity::Warning)
            .with_suggestion(Suggestion::new("Use `providedIn: 'root'`"))
            .with_suggestion(Suggestion::new("Use `providedIn: null`"));
        let formatted = v.format();
        assert!(formatted.contains("= help: Use `providedIn: 'root'`"));
        assert!(formatted.contains("= help: Use `providedIn: null`"));
    }

    #[test]
    fn violation_display_includes_doc_ref() {
        let v = make_violation(Severity::Error).with_doc_ref("docs/rules/il001.md");
        let display = format!("{v}");
        assert!(display.contains("(see: docs/rules/il001.md)"));
        assert!(display.starts_with("src/app/user.service.ts:3:1: error [IL001]"));
    }

    #[test]
    fn replacement_inserts_and_replaces() {
        assert_eq!(
            insertion(12, "{}").apply("@Injectable() class A {}").as_deref(),
            Some("@Injectable({}) class A {}")
        );

        let replace = Replacement::new(
            Location::new(PathBuf::from("a.ts"), 1, 2).with_span(1, 3),
            "xyz",
        );
        assert_eq!(replace.apply("(abc)").as_deref(), Some("(xyz)"));
        assert_eq!(insertion(10, "x").apply("short"), None);
    }

    #[test]
    fn suggestion_without_replacement_is_a_no_op() {
        let s = Suggestion::new("Use `providedIn: 'root'`");
        assert_eq!(s.apply("source").as_deref(), Some("source"));
    }

    #[test]
    fn diagnostic_joins_suggestions_into_help() {
        let v = make_violation(Severity::Error)
            .with_suggestion(Suggestion::new("a"))
            .with_suggestion(Suggestion::new("b"));
        let d = ViolationDiagnostic::from(&v);
        assert_eq!(d.help.as_deref(), Some("a, or b"));
    }

    #[test]
    fn result_counts_and_thresholds() {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_errors());
        assert!(result.has_violations_at(Severity::Warning));
        assert_eq!(
            result.summary(),
            "Found 0 error(s), 1 warning(s), 0 info(s) in 2 file(s)"
        );

        let mut other = LintResult::new();
        other.files_checked = 1;
        other.violations.push(make_violation(Severity::Error));
        result.extend(other);
        assert!(result.has_errors());
        assert_eq!(result.count_by_severity(), (1, 1, 0));
    }
}
