//! Classifies how an `async` pipe's result is used.

use crate::diagnostic::MessageId;
use crate::tree::{NodeData, NodeId, NodeKind, TemplateTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncPipeMatch {
    /// `!(value | async)`
    NegatedPipe { pipe: NodeId, negation: NodeId },
    /// `(value | async) == false`
    LooseEqualityWithFalse { pipe: NodeId, binary: NodeId },
}

impl AsyncPipeMatch {
    pub fn pipe(&self) -> NodeId {
        match *self {
            AsyncPipeMatch::NegatedPipe { pipe, .. } => pipe,
            AsyncPipeMatch::LooseEqualityWithFalse { pipe, .. } => pipe,
        }
    }

    pub fn message_id(&self) -> MessageId {
        match self {
            AsyncPipeMatch::NegatedPipe { .. } => MessageId::NoNegatedAsync,
            AsyncPipeMatch::LooseEqualityWithFalse { .. } => MessageId::NoLooseEquality,
        }
    }
}

/// Parent of `id`, looking through `( )` nodes for parsers that keep them.
pub fn effective_parent(tree: &TemplateTree, id: NodeId) -> Option<NodeId> {
    tree.ancestors(id)
        .find(|&ancestor| tree.kind(ancestor) != Some(NodeKind::ParenthesizedExpression))
}

/// `pipe` is expected to be an `async` pipe; picking those out is the
/// selector's job. Shapes that don't fit simply don't match.
pub fn classify(tree: &TemplateTree, pipe: NodeId) -> Option<AsyncPipeMatch> {
    if tree.kind(pipe)? != NodeKind::BindingPipe {
        return None;
    }
    let parent = effective_parent(tree, pipe)?;
    let parent_node = tree.get(parent)?;

    match parent_node.kind {
        NodeKind::PrefixNot => Some(AsyncPipeMatch::NegatedPipe {
            pipe,
            negation: parent,
        }),
        NodeKind::Binary => {
            let NodeData::Binary { operation, right, .. } = &parent_node.data else {
                return None;
            };
            // Only the right operand is inspected: `false == (x | async)` passes.
            let right = tree.get(*right)?;
            let right_is_false = right.kind == NodeKind::LiteralPrimitive
                && matches!(&right.data, NodeData::Literal(value) if value.is_false());
            if !right_is_false || operation != "==" {
                return None;
            }
            Some(AsyncPipeMatch::LooseEqualityWithFalse {
                pipe,
                binary: parent,
            })
        }
        _ => None,
    }
}
