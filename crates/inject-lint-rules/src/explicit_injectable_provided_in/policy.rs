//! Classification of injectable candidates.

use super::metadata::{ClassCandidate, MetadataField, ValueKind};

/// Verdict for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// `providedIn` is absent or the metadata shape is unsupported.
    Missing,
    /// `providedIn` holds a value outside the accepted set.
    Deprecated,
    /// `providedIn` holds an accepted value.
    Valid,
    /// The class is exempt from the rule.
    Excluded,
}

impl Classification {
    /// Returns true if this verdict produces a report.
    #[must_use]
    pub fn is_reported(self) -> bool {
        matches!(self, Self::Missing | Self::Deprecated)
    }

    /// Stable message identifier for reported verdicts.
    #[must_use]
    pub fn message_id(self) -> Option<&'static str> {
        match self {
            Self::Missing => Some("mandatoryFieldMissing"),
            Self::Deprecated => Some("deprecatedFieldValue"),
            Self::Valid | Self::Excluded => None,
        }
    }

    /// Human-readable message for reported verdicts.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Missing => Some("The `providedIn` property is mandatory for `Injectables`"),
            Self::Deprecated => Some(
                "This value for `providedIn` is deprecated. Use `'root'`, `'platform'` or `null` instead",
            ),
            Self::Valid | Self::Excluded => None,
        }
    }
}

/// A literal accepted as `providedIn` value, in suggestion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptedValue {
    /// `'root'`
    Root,
    /// `'platform'`
    Platform,
    /// `null`
    Null,
    /// `undefined`, only under [`PolicyConfig::accept_undefined`].
    Undefined,
}

impl AcceptedValue {
    /// Source text inserted by fixes.
    #[must_use]
    pub fn source_text(self) -> &'static str {
        match self {
            Self::Root => "'root'",
            Self::Platform => "'platform'",
            Self::Null => "null",
            Self::Undefined => "undefined",
        }
    }

    fn matches(self, field: &MetadataField<'_>) -> bool {
        match self {
            Self::Root => field.string_value() == Some("root"),
            Self::Platform => field.string_value() == Some("platform"),
            Self::Null => field.value_kind == ValueKind::NullLiteral,
            Self::Undefined => field.value_kind == ValueKind::UndefinedIdentifier,
        }
    }
}

const STANDARD_VALUES: &[AcceptedValue] =
    &[AcceptedValue::Root, AcceptedValue::Platform, AcceptedValue::Null];

const EXTENDED_VALUES: &[AcceptedValue] = &[
    AcceptedValue::Root,
    AcceptedValue::Platform,
    AcceptedValue::Null,
    AcceptedValue::Undefined,
];

/// Switches between the two flavors of the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Report unaccepted values as [`Classification::Deprecated`] instead of
    /// folding them into [`Classification::Missing`].
    pub distinguish_deprecated: bool,
    /// Accept `undefined` as a value and offer it as a suggestion.
    pub accept_undefined: bool,
}

impl PolicyConfig {
    /// Separate deprecation message, `undefined` rejected.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            distinguish_deprecated: true,
            accept_undefined: false,
        }
    }

    /// Single mandatory message, `undefined` accepted.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            distinguish_deprecated: false,
            accept_undefined: true,
        }
    }

    /// Accepted values in suggestion order.
    #[must_use]
    pub fn accepted_values(&self) -> &'static [AcceptedValue] {
        if self.accept_undefined {
            EXTENDED_VALUES
        } else {
            STANDARD_VALUES
        }
    }

    /// Returns true if the field's value is accepted.
    #[must_use]
    pub fn accepts(&self, field: &MetadataField<'_>) -> bool {
        self.accepted_values().iter().any(|v| v.matches(field))
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classifies `candidate` under `policy`.
#[must_use]
pub fn classify(candidate: &ClassCandidate<'_>, policy: &PolicyConfig) -> Classification {
    if candidate.excluded || !candidate.has_annotation {
        return Classification::Excluded;
    }
    let Some(field) = &candidate.field else {
        return Classification::Missing;
    };
    if policy.accepts(field) {
        Classification::Valid
    } else if policy.distinguish_deprecated {
        Classification::Deprecated
    } else {
        Classification::Missing
    }
}
