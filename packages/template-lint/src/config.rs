//! Linter Configuration
//!
//! Which rules run and at what level. Reading this from a config file is
//! the caller's business; it only needs to deserialize.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;
use crate::rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::Warn => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Rule name to level, in the order rules should run.
    #[serde(default)]
    pub rules: IndexMap<String, RuleLevel>,
}

impl LinterConfig {
    pub fn empty() -> Self {
        LinterConfig {
            rules: IndexMap::new(),
        }
    }

    pub fn with_rule(mut self, name: impl Into<String>, level: RuleLevel) -> Self {
        self.rules.insert(name.into(), level);
        self
    }
}

/// Every built-in rule at `error`.
impl Default for LinterConfig {
    fn default() -> Self {
        rules::all()
            .iter()
            .fold(LinterConfig::empty(), |config, rule| {
                config.with_rule(rule.meta().name, RuleLevel::Error)
            })
    }
}
