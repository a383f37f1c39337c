//! List rules command implementation.

use inject_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<35} Description", "Code", "Name");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<10} {:<35} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - IL001 as warning (default)");
    println!("  strict       - IL001 as error");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  inject-lint check --rules explicit-injectable-provided-in");
    println!("  inject-lint check --rules IL001");
}
