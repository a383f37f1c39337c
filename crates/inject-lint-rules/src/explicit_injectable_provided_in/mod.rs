//! Rule requiring an explicit `providedIn` on `@Injectable` classes.
//!
//! # Rationale
//!
//! Using the `providedIn` property makes `Injectables` tree-shakable.
//! Services without it, or with a scope other than `'root'`, `'platform'` or
//! `null`, are registered through module providers instead.
//!
//! # Detected Patterns
//!
//! - `@Injectable()` with no arguments
//! - `@Injectable({ ... })` without a `providedIn` entry
//! - `@Injectable(meta)` where the metadata is not an object literal
//! - `providedIn` set to any other value (`'any'`, a module class, ...)
//!
//! Classes implementing `HttpInterceptor` are never reported.
//!
//! # Configuration
//!
//! - `ignore_class_name_pattern`: class name, or `/regex/flags`, to skip
//! - `distinguish_deprecated`: report unaccepted values with a separate
//!   message (default: true)
//! - `accept_undefined`: accept and suggest `undefined` (default: false)

mod fixes;
mod metadata;
mod policy;
mod selectors;

pub use fixes::{fix_candidates, FixCandidate, TextEdit};
pub use metadata::{extract, extract_all, ClassCandidate, MetadataField, ValueKind, PROVIDED_IN};
pub use policy::{classify, AcceptedValue, Classification, PolicyConfig};
pub use selectors::{injectable_decorator, ClassNamePattern, Exclusion, SENTINEL_INTERFACE};

use inject_lint_core::query::{Listeners, Selector};
use inject_lint_core::{
    Config, FileContext, Label, Replacement, Rule, Severity, Suggestion, SyntaxTree, Violation,
};
use serde::Deserialize;
use tracing::debug;

use crate::OptionsError;

/// Rule code for explicit-injectable-provided-in.
pub const CODE: &str = "IL001";

/// Rule name for explicit-injectable-provided-in.
pub const NAME: &str = "explicit-injectable-provided-in";

/// Rule documentation, relative to the repository root.
pub const DOC_REF: &str = "docs/rules/explicit-injectable-provided-in.md";

/// Options accepted under `[rules.explicit-injectable-provided-in]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplicitInjectableProvidedInOptions {
    /// Class name or `/regex/flags` to skip.
    #[serde(alias = "ignoreClassNamePattern")]
    pub ignore_class_name_pattern: Option<String>,
    /// Overrides [`PolicyConfig::distinguish_deprecated`].
    #[serde(alias = "distinguishDeprecated")]
    pub distinguish_deprecated: Option<bool>,
    /// Overrides [`PolicyConfig::accept_undefined`].
    #[serde(alias = "acceptUndefined")]
    pub accept_undefined: Option<bool>,
}

/// Requires `@Injectable` classes to declare an accepted `providedIn`.
#[derive(Debug, Clone)]
pub struct ExplicitInjectableProvidedIn {
    policy: PolicyConfig,
    exclusion: Exclusion,
    selector: Selector,
    severity: Severity,
}

impl Default for ExplicitInjectableProvidedIn {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplicitInjectableProvidedIn {
    /// Creates the rule with the standard policy.
    #[must_use]
    pub fn new() -> Self {
        let exclusion = Exclusion::new();
        Self {
            policy: PolicyConfig::standard(),
            selector: injectable_decorator(&exclusion),
            exclusion,
            severity: Severity::Error,
        }
    }

    /// Creates the rule with the lenient policy.
    #[must_use]
    pub fn lenient() -> Self {
        Self::new().policy(PolicyConfig::lenient())
    }

    /// Sets the classification policy.
    #[must_use]
    pub fn policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Skips classes whose name matches `pattern`.
    #[must_use]
    pub fn ignore_class_name(mut self, pattern: ClassNamePattern) -> Self {
        self.exclusion = self.exclusion.with_class_name(pattern);
        self.selector = injectable_decorator(&self.exclusion);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Applies typed options on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the class-name pattern is not a valid regex.
    pub fn with_options(mut self, options: &ExplicitInjectableProvidedInOptions) -> Result<Self, OptionsError> {
        if let Some(pattern) = &options.ignore_class_name_pattern {
            let parsed = ClassNamePattern::parse(pattern).map_err(|source| OptionsError::Pattern {
                rule: NAME,
                pattern: pattern.clone(),
                source,
            })?;
            self = self.ignore_class_name(parsed);
        }
        if let Some(distinguish) = options.distinguish_deprecated {
            self.policy.distinguish_deprecated = distinguish;
        }
        if let Some(accept) = options.accept_undefined {
            self.policy.accept_undefined = accept;
        }
        Ok(self)
    }

    /// Builds the rule from the `[rules.explicit-injectable-provided-in]`
    /// section of `config`, starting from `self`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown options or an invalid pattern.
    pub fn configured(self, config: &Config) -> Result<Self, OptionsError> {
        match config.rules.get(NAME) {
            Some(rule_config) => {
                let options: ExplicitInjectableProvidedInOptions = rule_config.options(NAME)?;
                self.with_options(&options)
            }
            None => Ok(self),
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy_config(&self) -> PolicyConfig {
        self.policy
    }

    fn report(&self, ctx: &FileContext, tree: &SyntaxTree, candidate: &ClassCandidate<'_>) -> Option<Violation> {
        let classification = classify(candidate, &self.policy);
        let (Some(message_id), Some(message)) = (classification.message_id(), classification.message())
        else {
            debug!(
                "{}: `{}` classified {:?}",
                ctx.relative_path.display(),
                candidate.class_name,
                classification
            );
            return None;
        };

        let node = candidate.field.map_or(candidate.decorator, |f| f.value);
        let mut violation = Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(tree, node.span()),
            message,
        )
        .with_message_id(message_id)
        .with_doc_ref(DOC_REF);

        if let Some(name) = candidate.class.child_by_field("name") {
            violation = violation.with_label(Label::new(
                ctx.location(tree, name.span()),
                format!("`{}` is injectable", candidate.class_name),
            ));
        }

        for fix in fix_candidates(candidate, &self.policy) {
            let suggestion = match fix.edit {
                Some(edit) => Suggestion::with_fix(
                    fix.label,
                    Replacement::new(ctx.location(tree, edit.span), edit.text),
                ),
                None => Suggestion::new(fix.label),
            };
            violation = violation.with_suggestion(suggestion);
        }
        Some(violation)
    }
}

impl Rule for ExplicitInjectableProvidedIn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires an explicit `providedIn` on `@Injectable` classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let excluded_class = self.exclusion.selector();
        let mut violations = Vec::new();

        Listeners::new()
            .on(self.selector.clone(), |decorator, out: &mut Vec<Violation>| {
                let Some(candidate) = extract(decorator, &excluded_class) else {
                    return;
                };
                out.extend(self.report(ctx, tree, &candidate));
            })
            .run(tree, &mut violations);

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inject_lint_core::SourceParser;
    use inject_lint_ts::TypeScriptParser;
    use std::path::Path;

    const SCENARIOS: &str = r"import { Injectable } from '@angular/core';
import { HttpInterceptor } from '@angular/common/http';

@Injectable()
export class Foo {}

@Injectable({ providedIn: 'legacy' })
export class Bar {}

@Injectable()
export class Baz implements HttpInterceptor {}

@Injectable()
export class QuxMock {}

@Injectable({ providedIn: 'root' })
export class Valid {}
";

    fn check(rule: &ExplicitInjectableProvidedIn, src: &str) -> Vec<Violation> {
        let tree = TypeScriptParser::new().parse(src).unwrap();
        let ctx = FileContext::new(Path::new("app.service.ts"), src, Path::new(""));
        rule.check(&ctx, &tree)
    }

    fn suggestion_labels(v: &Violation) -> Vec<&str> {
        v.suggestions.iter().map(|s| s.message.as_str()).collect()
    }

    fn standard_rule() -> ExplicitInjectableProvidedIn {
        ExplicitInjectableProvidedIn::new().ignore_class_name(ClassNamePattern::parse("/^Qux/").unwrap())
    }

    #[test]
    fn standard_policy_scenarios() {
        let violations = check(&standard_rule(), SCENARIOS);
        assert_eq!(violations.len(), 2);

        let foo = &violations[0];
        assert_eq!(foo.message_id.as_deref(), Some("mandatoryFieldMissing"));
        assert_eq!((foo.location.line, foo.location.column), (4, 1));
        assert_eq!(foo.location.length, "@Injectable()".len());
        assert_eq!(
            suggestion_labels(foo),
            vec![
                "Use `providedIn: 'root'`",
                "Use `providedIn: 'platform'`",
                "Use `providedIn: null`"
            ]
        );
        assert_eq!(foo.labels[0].message, "`Foo` is injectable");

        let bar = &violations[1];
        assert_eq!(bar.message_id.as_deref(), Some("deprecatedFieldValue"));
        assert_eq!(bar.location.line, 7);
        assert_eq!(bar.location.length, "'legacy'".len());
        assert_eq!(suggestion_labels(bar).len(), 3);
    }

    #[test]
    fn lenient_policy_scenarios() {
        let rule = ExplicitInjectableProvidedIn::lenient()
            .ignore_class_name(ClassNamePattern::parse("/^Qux/").unwrap());
        let violations = check(&rule, SCENARIOS);
        assert_eq!(violations.len(), 2);

        assert_eq!(
            suggestion_labels(&violations[0]).last(),
            Some(&"Use `providedIn: undefined`")
        );
        assert_eq!(
            violations[1].message_id.as_deref(),
            Some("mandatoryFieldMissing")
        );
        assert_eq!(violations[1].location.line, 7);
    }

    #[test]
    fn without_pattern_qux_is_reported() {
        let violations = check(&ExplicitInjectableProvidedIn::new(), SCENARIOS);
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[2].labels[0].message, "`QuxMock` is injectable");
    }

    #[test]
    fn suggestions_apply_to_source() {
        let violations = check(&standard_rule(), SCENARIOS);
        let fixed = violations[0].suggestions[0].apply(SCENARIOS).unwrap();
        assert!(fixed.contains("@Injectable({ providedIn: 'root' })\nexport class Foo {}"));

        let fixed = violations[1].suggestions[2].apply(SCENARIOS).unwrap();
        assert!(fixed.contains("@Injectable({ providedIn: null })\nexport class Bar {}"));

        assert!(check(&standard_rule(), &fixed)
            .iter()
            .all(|v| v.location.line != 7));
    }

    #[test]
    fn anonymous_default_export_is_reported() {
        let violations = check(
            &ExplicitInjectableProvidedIn::new(),
            "@Injectable()\nexport default class {}\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message_id.as_deref(), Some("mandatoryFieldMissing"));
        assert!(violations[0].labels.is_empty());
        assert_eq!(violations[0].doc_ref.as_deref(), Some(DOC_REF));
    }

    #[test]
    fn computed_key_counts_as_present() {
        let rule = ExplicitInjectableProvidedIn::new();
        assert!(check(&rule, "@Injectable({ ['providedIn']: 'root' })\nclass A {}\n").is_empty());

        let src = "@Injectable({ ['providedIn']: 'any' })\nclass A {}\n";
        let violations = check(&rule, src);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message_id.as_deref(), Some("deprecatedFieldValue"));
        let fixed = violations[0].suggestions[0].apply(src).unwrap();
        assert_eq!(fixed, "@Injectable({ ['providedIn']: 'root' })\nclass A {}\n");
    }

    #[test]
    fn unsupported_argument_reports_without_edits() {
        let violations = check(
            &ExplicitInjectableProvidedIn::new(),
            "const META = {};\n@Injectable(META)\nclass A {}\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message_id.as_deref(), Some("mandatoryFieldMissing"));
        assert!(violations[0].suggestions.iter().all(|s| s.replacement.is_none()));
    }

    #[test]
    fn options_from_config() {
        let config = Config::parse(
            r#"
[rules.explicit-injectable-provided-in]
severity = "warning"
ignoreClassNamePattern = "/^Qux/"
accept_undefined = true
"#,
        )
        .unwrap();
        let rule = ExplicitInjectableProvidedIn::new().configured(&config).unwrap();
        assert_eq!(
            rule.policy_config(),
            PolicyConfig {
                distinguish_deprecated: true,
                accept_undefined: true
            }
        );
        assert_eq!(check(&rule, SCENARIOS).len(), 2);
    }

    #[test]
    fn rejects_unknown_option_and_bad_regex() {
        let unknown = Config::parse("[rules.explicit-injectable-provided-in]\nignore = \"x\"\n").unwrap();
        assert!(matches!(
            ExplicitInjectableProvidedIn::new().configured(&unknown),
            Err(OptionsError::Config(_))
        ));

        let bad = Config::parse(
            "[rules.explicit-injectable-provided-in]\nignore_class_name_pattern = \"/(/\"\n",
        )
        .unwrap();
        assert!(matches!(
            ExplicitInjectableProvidedIn::new().configured(&bad),
            Err(OptionsError::Pattern { .. })
        ));
    }
}
