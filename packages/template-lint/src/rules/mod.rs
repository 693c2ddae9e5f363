//! Rules
//!
//! A rule names the nodes it wants through selectors and reports through a
//! [`RuleContext`]. Rules hold no state between calls.

pub mod no_negated_async;

use serde::Serialize;

use crate::diagnostic::{Diagnostic, MessageId, Severity};
use crate::parse_util::AbsoluteSourceSpan;
use crate::source_code::SourceCode;
use crate::tree::{NodeId, TemplateTree};

pub use no_negated_async::NoNegatedAsync;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Problem,
    Suggestion,
    Layout,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fixable {
    Code,
    Whitespace,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMeta {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: RuleType,
    pub description: &'static str,
    pub category: &'static str,
    pub recommended: bool,
    pub fixable: Option<Fixable>,
    pub messages: &'static [MessageId],
}

pub trait Rule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    /// ESLint-style selectors, e.g. `BindingPipe[name=async]`
    fn selectors(&self) -> &'static [&'static str];

    /// Called once per node matching one of [`Rule::selectors`].
    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeId);
}

/// Built-in rules.
pub fn all() -> Vec<Box<dyn Rule>> {
    vec![Box::new(NoNegatedAsync)]
}

pub fn find(name: &str) -> Option<Box<dyn Rule>> {
    all().into_iter().find(|rule| rule.meta().name == name)
}

pub struct RuleContext<'a> {
    pub tree: &'a TemplateTree,
    pub source: &'a SourceCode<'a>,
    meta: &'static RuleMeta,
    severity: Severity,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        tree: &'a TemplateTree,
        source: &'a SourceCode<'a>,
        meta: &'static RuleMeta,
        severity: Severity,
    ) -> Self {
        RuleContext {
            tree,
            source,
            meta,
            severity,
            diagnostics: Vec::new(),
        }
    }

    /// Ranges the source cannot place are logged and dropped.
    pub fn report(&mut self, message_id: MessageId, range: AbsoluteSourceSpan) {
        let loc = match self.source.convert_span_to_loc(range) {
            Ok(loc) => loc,
            Err(err) => {
                tracing::warn!(rule = self.meta.name, ?range, %err, "dropping unplaceable diagnostic");
                return;
            }
        };
        self.diagnostics.push(Diagnostic {
            rule_id: self.meta.name,
            message_id,
            message: message_id.message(),
            severity: self.severity,
            loc,
            range,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_code::Position;

    #[test]
    fn test_find_builtin_rule() {
        let rule = find("no-negated-async").unwrap();
        assert_eq!(rule.meta().kind, RuleType::Suggestion);
        assert_eq!(rule.meta().fixable, Some(Fixable::Code));
        assert!(!rule.meta().recommended);
        assert!(find("no-such-rule").is_none());
    }

    #[test]
    fn test_report_converts_and_drops_out_of_range() {
        let tree = TemplateTree::from_nodes(&[]);
        let source = SourceCode::new("ab\ncd");
        let meta = NoNegatedAsync.meta();
        let mut ctx = RuleContext::new(&tree, &source, meta, Severity::Error);

        ctx.report(MessageId::NoNegatedAsync, AbsoluteSourceSpan::new(1, 4));
        ctx.report(MessageId::NoNegatedAsync, AbsoluteSourceSpan::new(1, 40));

        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].loc.start, Position::new(1, 1));
        assert_eq!(diagnostics[0].loc.end, Position::new(2, 1));
        assert_eq!(diagnostics[0].rule_id, "no-negated-async");
    }
}
