//! Configuration file resolution with global fallback.
//!
//! Resolution order:
//!
//! 1. `--config` flag (a file, or a directory holding `inject-lint.toml`)
//! 2. `inject-lint.toml` or `.inject-lint.toml` in the analyzed directory or
//!    the nearest ancestor that has one
//! 3. `$INJECT_LINT_CONFIG_DIR/config.toml`, else `~/.inject-lint/config.toml`
//! 4. No config found → defaults

use anyhow::{Context, Result};
use inject_lint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory or one of its ancestors.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Loads the configuration this source points at.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        if self.is_global() {
            tracing::info!("Using global config: {}", path.display());
        } else {
            tracing::debug!("Using config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["inject-lint.toml", ".inject-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

fn resolve_inner(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        if p.is_dir() {
            return ConfigSource::Explicit(p.join(PROJECT_CONFIG_NAMES[0]));
        }
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_in_ancestors(project_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.is_file() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Nearest project config at or above `start`.
fn find_in_ancestors(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    start.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Returns the global config directory path.
///
/// Resolution: `$INJECT_LINT_CONFIG_DIR` > `~/.inject-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("INJECT_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".inject-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_file_wins_and_is_not_checked() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("inject-lint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn explicit_directory_points_at_config_name() {
        let tmp = TempDir::new().unwrap();
        let result = resolve_inner(Path::new("."), Some(tmp.path()), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(tmp.path().join("inject-lint.toml"))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("inject-lint.toml"), "").unwrap();
        fs::write(tmp.path().join(".inject-lint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        let found = result.path().unwrap();
        assert_eq!(found.file_name().unwrap(), "inject-lint.toml");
    }

    #[test]
    fn config_found_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".inject-lint.toml"), "").unwrap();
        let nested = tmp.path().join("src/app");
        fs::create_dir_all(&nested).unwrap();

        let result = resolve_inner(&nested, None, None);
        assert!(matches!(result, ConfigSource::Project(_)));
        assert_eq!(
            result.path().unwrap().file_name().unwrap(),
            ".inject-lint.toml"
        );
    }

    #[test]
    fn global_fallback_and_default() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);

        fs::write(global.path().join("config.toml"), "").unwrap();
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(result.is_global());
    }

    #[test]
    fn load_reads_the_resolved_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inject-lint.toml");
        fs::write(&path, "preset = \"strict\"\n").unwrap();

        let config = ConfigSource::Project(path).load().unwrap();
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert!(ConfigSource::Default.load().unwrap().rules.is_empty());
        assert!(ConfigSource::Explicit(tmp.path().join("missing.toml"))
            .load()
            .is_err());
    }
}
