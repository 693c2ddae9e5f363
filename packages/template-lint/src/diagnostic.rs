//! Diagnostics
//!
//! What a rule hands back to the caller: which message, where, and how
//! severe.

use std::fmt;

use serde::Serialize;

use crate::parse_util::AbsoluteSourceSpan;
use crate::source_code::SourceLocation;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    NoNegatedAsync,
    NoLooseEquality,
}

impl MessageId {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageId::NoNegatedAsync => "noNegatedAsync",
            MessageId::NoLooseEquality => "noLooseEquality",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MessageId::NoNegatedAsync => {
                "Async pipes should not be negated. Use (observable | async) === (false | null | undefined) to check its value instead."
            }
            MessageId::NoLooseEquality => {
                "Async pipes must use strict equality `===` when comparing with `false`."
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule_id: &'static str,
    pub message_id: MessageId,
    pub message: &'static str,
    pub severity: Severity,
    pub loc: SourceLocation,
    /// Character range of `loc` in the file.
    pub range: AbsoluteSourceSpan,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}  {}  {}  {}",
            self.loc.start.line, self.loc.start.column, self.severity, self.message, self.rule_id
        )
    }
}
