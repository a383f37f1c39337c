//! Shared output formatting for lint results.

use anyhow::Result;
use inject_lint_core::{LintResult, Severity, Suggestion, Violation, ViolationDiagnostic};
use miette::{NamedSource, Report};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` resolves violation paths for the pretty format.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path, show_fixes: bool) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, show_fixes),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn print_text(result: &LintResult, show_fixes: bool) {
    let (errors, warnings, _) = result.count_by_severity();

    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        for suggestion in &violation.suggestions {
            println!("  = help: {}", suggestion.message);
            if show_fixes {
                println!("      {}", describe_fix(suggestion));
            }
        }
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("{summary_color}{}\x1b[0m", result.summary());
}

/// One-line description of a suggestion's edit.
fn describe_fix(suggestion: &Suggestion) -> String {
    match &suggestion.replacement {
        Some(r) if r.location.length == 0 => format!(
            "insert `{}` at {}:{}",
            r.new_text, r.location.line, r.location.column
        ),
        Some(r) => format!(
            "replace {} byte(s) at {}:{} with `{}`",
            r.location.length, r.location.line, r.location.column, r.new_text
        ),
        None => "no automatic edit".to_string(),
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, root: &Path) {
    for violation in &result.violations {
        eprintln!("{:?}", pretty_report(violation, root));
    }
    println!("{}", result.summary());
}

fn pretty_report(violation: &Violation, root: &Path) -> Report {
    let report = Report::new(ViolationDiagnostic::from(violation));
    let path = root.join(&violation.location.file);
    match std::fs::read_to_string(&path) {
        Ok(source) => report.with_source_code(NamedSource::new(
            violation.location.file.display().to_string(),
            source,
        )),
        Err(e) => {
            tracing::debug!("No source for {}: {}", path.display(), e);
            report
        }
    }
}
