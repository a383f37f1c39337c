//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_NAME: &str = "inject-lint.toml";

const DEFAULT_CONFIG: &str = r#"# inject-lint configuration

# "recommended" reports as warnings, "strict" as errors
preset = "recommended"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

[rules.explicit-injectable-provided-in]
enabled = true
# severity = "error"  # Override preset severity

# Skip classes by exact name or /regex/flags
# ignore_class_name_pattern = "/Mock$/"

# Report unaccepted values as deprecated instead of missing
distinguish_deprecated = true

# Accept and suggest `providedIn: undefined`
accept_undefined = false
"#;

/// Runs the init command, writing the config into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    println!("Created {CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: inject-lint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inject_lint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_loadable() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert!(inject_lint_rules::configured_rules(&config).is_ok());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        run(tmp.path(), false).unwrap();
        assert!(run(tmp.path(), false).is_err());
        assert!(run(tmp.path(), true).is_ok());
    }
}
