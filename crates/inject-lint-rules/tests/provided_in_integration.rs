//! End-to-end tests: fixture project through the analyzer.

use std::path::{Path, PathBuf};

use inject_lint_core::{Analyzer, Config, Severity};
use inject_lint_rules::{configured_rules, ExplicitInjectableProvidedIn};
use inject_lint_ts::TypeScriptParser;

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/app")
}

fn analyzer(root: &Path, config: Config) -> Analyzer {
    let rules = configured_rules(&config).expect("valid rule options");
    Analyzer::builder()
        .root(root)
        .parser(TypeScriptParser::new())
        .parser(TypeScriptParser::tsx())
        .rules(rules)
        .config(config)
        .build()
        .expect("analyzer")
}

#[test]
fn fixture_project_report() {
    let root = fixture_root();
    let config = Config::from_file(&root.join("inject-lint.toml")).expect("fixture config");
    let result = analyzer(&root, config).analyze().expect("analysis");

    assert_eq!(result.files_checked, 7);
    assert!(result.has_errors());

    let report = result
        .violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(report, @r"
    src/app/legacy.service.ts:3:27: error [IL001] This value for `providedIn` is deprecated. Use `'root'`, `'platform'` or `null` instead (see: docs/rules/explicit-injectable-provided-in.md)
    src/app/user.service.ts:3:1: error [IL001] The `providedIn` property is mandatory for `Injectables` (see: docs/rules/explicit-injectable-provided-in.md)
    src/components/widget.tsx:3:1: error [IL001] The `providedIn` property is mandatory for `Injectables` (see: docs/rules/explicit-injectable-provided-in.md)
    ");
}

#[test]
fn suggestions_fix_the_fixture_files() {
    let root = fixture_root();
    let config = Config::from_file(&root.join("inject-lint.toml")).expect("fixture config");
    let analyzer = analyzer(&root, config);
    let result = analyzer.analyze().expect("analysis");

    for violation in &result.violations {
        let path = root.join(&violation.location.file);
        let source = std::fs::read_to_string(&path).expect("fixture source");
        for suggestion in &violation.suggestions {
            let fixed = suggestion.apply(&source).expect("suggestion applies");
            let remaining = analyzer
                .check_source(&path, &fixed)
                .expect("fixed source parses");
            assert!(
                remaining.is_empty(),
                "{} after `{}`:\n{fixed}",
                violation.location.file.display(),
                suggestion.message
            );
        }
    }
}

#[test]
fn severity_override_and_disable() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("a.service.ts"),
        "@Injectable()\nexport class A {}\n",
    )
    .expect("write");

    let warn = Config::parse("[rules.explicit-injectable-provided-in]\nseverity = \"info\"\n")
        .expect("config");
    let result = analyzer(dir.path(), warn).analyze().expect("analysis");
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].severity, Severity::Info);
    assert!(!result.has_errors());

    let disabled = Config::parse("[rules.explicit-injectable-provided-in]\nenabled = false\n")
        .expect("config");
    let result = analyzer(dir.path(), disabled).analyze().expect("analysis");
    assert!(result.violations.is_empty());
    assert_eq!(result.files_checked, 1);
}

#[test]
fn check_source_with_plain_rule() {
    let analyzer = Analyzer::builder()
        .root("/project")
        .parser(TypeScriptParser::new())
        .rule(ExplicitInjectableProvidedIn::lenient())
        .build()
        .expect("analyzer");

    let violations = analyzer
        .check_source(
            Path::new("/project/src/a.service.ts"),
            "@Injectable({ providedIn: undefined })\nexport class A {}\n\n@Injectable({ providedIn: 'any' })\nexport class B {}\n",
        )
        .expect("parses");

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].location.file, Path::new("src/a.service.ts"));
    assert_eq!(violations[0].location.line, 4);
    assert_eq!(
        violations[0].message_id.as_deref(),
        Some("mandatoryFieldMissing")
    );
    assert_eq!(violations[0].suggestions.len(), 4);
}
