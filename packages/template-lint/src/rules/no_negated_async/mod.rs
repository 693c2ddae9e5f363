//! `no-negated-async`
//!
//! Flags `!(value | async)` and `(value | async) == false`. Before the
//! source emits, `async` yields `null`, so both forms read a pending value
//! as a resolved `false`. `(value | async) === false` is the accepted form.

pub mod matcher;
pub mod span_resolver;

use crate::diagnostic::MessageId;
use crate::parse_util::AbsoluteSourceSpan;
use crate::rules::{Fixable, Rule, RuleContext, RuleMeta, RuleType};
use crate::tree::{NodeId, TemplateTree};

pub use matcher::{classify, AsyncPipeMatch};
pub use span_resolver::resolve;

pub const RULE_NAME: &str = "no-negated-async";

static META: RuleMeta = RuleMeta {
    name: RULE_NAME,
    kind: RuleType::Suggestion,
    description: "Ensures that strict equality is used when evaluating negations on async pipe output",
    category: "Best Practices",
    recommended: false,
    fixable: Some(Fixable::Code),
    messages: &[MessageId::NoNegatedAsync, MessageId::NoLooseEquality],
};

pub struct NoNegatedAsync;

impl Rule for NoNegatedAsync {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn selectors(&self) -> &'static [&'static str] {
        &["BindingPipe[name=async]"]
    }

    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeId) {
        if let Some((message_id, range)) = check_pipe(ctx.tree, node) {
            ctx.report(message_id, range);
        }
    }
}

/// Runs the matcher on one `async` pipe and, on a match, resolves the range
/// to report. A match whose range cannot be recovered is logged and skipped
/// so the rest of the template is still checked.
pub fn check_pipe(tree: &TemplateTree, pipe: NodeId) -> Option<(MessageId, AbsoluteSourceSpan)> {
    let found = classify(tree, pipe)?;
    let message_id = found.message_id();
    match resolve(tree, &found) {
        Ok(range) => {
            tracing::debug!(?pipe, message_id = message_id.as_str(), ?range, "async pipe misuse");
            Some((message_id, range))
        }
        Err(err) => {
            tracing::warn!(?pipe, message_id = message_id.as_str(), %err, "could not resolve span, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression_parser::ast::{ASTWithSource, AST};
    use crate::parse_util::ParseSpan;
    use crate::tree::NodeKind;

    #[test]
    fn test_unresolvable_match_is_skipped() {
        // `!value | async` spans that leave no room for `!(` before the pipe.
        let ast = AST::prefix_not(
            ParseSpan::new(0, 14),
            AST::pipe(
                ParseSpan::new(1, 14),
                AST::property_read(ParseSpan::new(1, 6), "value"),
                "async",
            ),
        );
        let tree = TemplateTree::from_expression(&ASTWithSource::new(ast, None, 0));
        let (pipe, _) = tree
            .iter()
            .find(|(_, node)| node.kind == NodeKind::BindingPipe)
            .unwrap();

        assert!(classify(&tree, pipe).is_some());
        assert_eq!(check_pipe(&tree, pipe), None);
    }
}
