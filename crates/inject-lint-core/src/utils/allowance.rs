//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // inject-lint: allow(explicit-injectable-provided-in) reason="provided by a feature module"
//! ```

use std::collections::HashSet;

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule names that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    /// Returns true if this directive covers `rule_name`.
    #[must_use]
    pub fn covers(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }
}

/// Checks whether `line` (1-indexed) or the line above carries an allow
/// directive for `rule_name`.
#[must_use]
pub fn check_allow(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 {
            continue;
        }
        let Some(text) = lines.get(check_line - 1) else {
            continue;
        };
        if let Some(directive) = parse_allow_directive(text) {
            if directive.covers(rule_name) {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a line.
///
/// The directive may trail code on the same line, including code that
/// itself contains `//` (URLs in string literals).
#[must_use]
pub fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    line.match_indices("//")
        .find_map(|(start, _)| parse_comment(&line[start + 2..]))
}

fn parse_comment(comment: &str) -> Option<AllowDirective> {
    let comment = comment.trim_start_matches('/').trim();

    let directive = comment.strip_prefix("inject-lint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .and_then(|r| r.trim().strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}
