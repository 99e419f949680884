use crate::rewrite::token::{replace_bounded, Boundary};
use std::borrow::Cow;
use std::fmt;

/// A single declarative substitution applied to file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteRule {
    /// `com.old` -> `com.new`, package token boundaries.
    Package { from: String, to: String },
    /// `:oldLib` -> `:newLib`, module-path token boundaries.
    ModuleReference { from: String, to: String },
}

impl RewriteRule {
    pub fn package(from: impl Into<String>, to: impl Into<String>) -> Self {
        RewriteRule::Package {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Build a module reference rule from bare library ids.
    pub fn module_reference(from_library: &str, to_library: &str) -> Self {
        RewriteRule::ModuleReference {
            from: format!(":{from_library}"),
            to: format!(":{to_library}"),
        }
    }

    pub fn apply<'a>(&self, content: &'a str) -> (Cow<'a, str>, usize) {
        match self {
            RewriteRule::Package { from, to } => {
                replace_bounded(content, from, to, Boundary::Package)
            }
            RewriteRule::ModuleReference { from, to } => {
                replace_bounded(content, from, to, Boundary::ModulePath)
            }
        }
    }

    /// True when the rule would never change anything.
    pub fn is_noop(&self) -> bool {
        match self {
            RewriteRule::Package { from, to } | RewriteRule::ModuleReference { from, to } => {
                from == to
            }
        }
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteRule::Package { from, to } => write!(f, "package {from} -> {to}"),
            RewriteRule::ModuleReference { from, to } => write!(f, "module {from} -> {to}"),
        }
    }
}

/// Apply `rules` in order; returns the final content and the total number of
/// replacements.
pub fn apply_rules<'a>(content: &'a str, rules: &[RewriteRule]) -> (Cow<'a, str>, usize) {
    let mut current = Cow::Borrowed(content);
    let mut total = 0;
    for rule in rules {
        let (next, count) = rule.apply(&current);
        if count > 0 {
            let owned = next.into_owned();
            current = Cow::Owned(owned);
            total += count;
        }
    }
    (current, total)
}
