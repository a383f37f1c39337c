//! Check command implementation.

use anyhow::{Context, Result};
use inject_lint_core::{Analyzer, RuleBox};
use inject_lint_rules::configured_rules;
use inject_lint_ts::TypeScriptParser;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to keep.
    pub rules_filter: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Print suggestion edits.
    pub show_fixes: bool,
    /// Abort on parse failures.
    pub fail_on_parse_error: bool,
}

/// Runs the check command. Returns `true` if error-level violations were found.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = source.load()?;

    let rules = configured_rules(&config).context("Invalid rule configuration")?;
    let rules = match &options.rules_filter {
        Some(filter) => filter_rules(rules, filter),
        None => rules,
    };

    let analyzer = Analyzer::builder()
        .root(path)
        .parser(TypeScriptParser::new())
        .parser(TypeScriptParser::tsx())
        .rules(rules)
        .excludes(options.exclude.iter().cloned())
        .config(config)
        .fail_on_parse_error(options.fail_on_parse_error)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root(), options.show_fixes)?;

    Ok(result.has_errors())
}

/// Keeps the rules whose name or code is listed in `filter`.
fn filter_rules(rules: Vec<RuleBox>, filter: &str) -> Vec<RuleBox> {
    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    for name in &wanted {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    rules
        .into_iter()
        .filter(|r| wanted.iter().any(|w| r.name() == *w || r.code() == *w))
        .collect()
}
