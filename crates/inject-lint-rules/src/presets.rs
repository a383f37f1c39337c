//! Rule presets for common configurations.

use std::str::FromStr;

use crate::{ExplicitInjectableProvidedIn, OptionsError};
use inject_lint_core::{Config, RuleBox, Severity};

/// Preset configurations for inject-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Recommended rules, reported as warnings.
    #[default]
    Recommended,
    /// Every rule reported as an error.
    Strict,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
        }
    }

    /// Preset name as written in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
        }
    }
}

impl FromStr for Preset {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            other => Err(OptionsError::UnknownPreset(other.to_string())),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `explicit-injectable-provided-in` (IL001) as a warning
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![Box::new(
        ExplicitInjectableProvidedIn::new().severity(Severity::Warning),
    )]
}

/// Returns the strict set of rules.
///
/// Includes:
/// - `explicit-injectable-provided-in` (IL001) as an error
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![Box::new(ExplicitInjectableProvidedIn::new())]
}

/// Returns all available rules with their default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(ExplicitInjectableProvidedIn::new())]
}

/// Builds the rules selected by `config.preset`, with per-rule options applied.
///
/// # Errors
///
/// Returns an error for an unknown preset or invalid rule options.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, OptionsError> {
    let preset = config
        .preset
        .as_deref()
        .map(Preset::from_str)
        .transpose()?
        .unwrap_or_default();

    let severity = match preset {
        Preset::Recommended => Severity::Warning,
        Preset::Strict => Severity::Error,
    };
    let rule = ExplicitInjectableProvidedIn::new()
        .severity(severity)
        .configured(config)?;
    Ok(vec![Box::new(rule)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert!(!Preset::Recommended.rules().is_empty());
        assert!(!Preset::Strict.rules().is_empty());
        assert_eq!(all_rules()[0].code(), "IL001");
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in [Preset::Recommended, Preset::Strict] {
            assert_eq!(preset.as_str().parse::<Preset>().unwrap(), preset);
        }
        assert!(matches!(
            "paranoid".parse::<Preset>(),
            Err(OptionsError::UnknownPreset(_))
        ));
    }

    #[test]
    fn configured_rules_follow_preset() {
        let rules = configured_rules(&Config::default()).unwrap();
        assert_eq!(rules[0].default_severity(), Severity::Warning);

        let strict = Config::parse("preset = \"strict\"\n").unwrap();
        let rules = configured_rules(&strict).unwrap();
        assert_eq!(rules[0].default_severity(), Severity::Error);

        let bad = Config::parse("preset = \"paranoid\"\n").unwrap();
        assert!(configured_rules(&bad).is_err());
    }
}
