//! Binding-facing names for native functions.
//!
//! Names are derived with an ordered rule table. Rules are evaluated in
//! order and the first rule whose prefix matches wins; a name no rule
//! matches is used unchanged.

use serde::{Deserialize, Serialize};

/// A prefix rule: names starting with `prefix` lose their leading `strip`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRule {
    /// Prefix that selects this rule
    pub prefix: String,

    /// Leading text removed from a matching name (a prefix of `prefix`)
    pub strip: String,
}

impl NameRule {
    /// A rule that removes its whole prefix.
    pub fn strip_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        NameRule {
            strip: prefix.clone(),
            prefix,
        }
    }

    /// A rule that matches on `prefix` but only removes `strip`.
    pub fn new(prefix: impl Into<String>, strip: impl Into<String>) -> Self {
        NameRule {
            prefix: prefix.into(),
            strip: strip.into(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.prefix)
    }

    fn apply<'a>(&self, name: &'a str) -> &'a str {
        name.strip_prefix(self.strip.as_str()).unwrap_or(name)
    }
}

/// The default rule table for the cimgui API.
pub fn default_rules() -> Vec<NameRule> {
    vec![
        NameRule::strip_prefix("ig"),
        NameRule::strip_prefix("ImGui_"),
        NameRule::new("ImFontAtlas_", "Im"),
    ]
}

/// Maps native function names to binding names.
#[derive(Debug, Clone)]
pub struct NameMapper {
    rules: Vec<NameRule>,
}

impl Default for NameMapper {
    fn default() -> Self {
        NameMapper::new(default_rules())
    }
}

impl NameMapper {
    /// Create a mapper with the given ordered rules.
    pub fn new(rules: Vec<NameRule>) -> Self {
        NameMapper { rules }
    }

    pub fn rules(&self) -> &[NameRule] {
        &self.rules
    }

    /// Map a native name. Never fails.
    pub fn map<'a>(&self, native: &'a str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| rule.matches(native))
            .map_or(native, |rule| rule.apply(native))
    }
}
