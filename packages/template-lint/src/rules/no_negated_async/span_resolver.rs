//! Recovers the file-absolute range to underline for a match.
//!
//! Expression nodes only know offsets into their own expression string, and
//! the `( )` around a negated or compared pipe usually leave no node behind.
//! The range is rebuilt from three kinds of context:
//!
//! - the negation is the whole value of a bound attribute: use the
//!   attribute's value span;
//! - the comparison sits in an interpolation inside an element: count from
//!   the bound text's start;
//! - anything else: shift the node's span by where its expression starts and
//!   step over the delimiters the source is assumed to have.

use crate::error::ResolveError;
use crate::parse_util::{AbsoluteSourceSpan, ParseSpan};
use crate::tree::{NodeData, NodeId, NodeKind, TemplateTree};

use super::matcher::AsyncPipeMatch;

pub const NEGATION: &str = "!";
pub const OPEN_PAREN: &str = "(";
pub const CLOSE_PAREN: &str = ")";
pub const INTERPOLATION_START: &str = "{{";
/// Fallback when the attribute has no value span of its own.
pub const NG_IF_ATTRIBUTE_PREFIX: &str = "*ngIf=\"";
pub const ATTRIBUTE_QUOTE: &str = "\"";

/// A file offset that steps over delimiter text. Offsets are in
/// characters and every step is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedOffset(usize);

impl DelimitedOffset {
    pub fn new(offset: usize) -> Self {
        DelimitedOffset(offset)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn advance(self, by: usize) -> Result<Self, ResolveError> {
        self.0
            .checked_add(by)
            .map(DelimitedOffset)
            .ok_or(ResolveError::OffsetOverflow { offset: self.0, by })
    }

    pub fn back_over(self, delimiters: &[&str]) -> Result<Self, ResolveError> {
        delimiters.iter().try_fold(self, |offset, delimiter| {
            offset
                .0
                .checked_sub(delimiter.chars().count())
                .map(DelimitedOffset)
                .ok_or_else(|| ResolveError::DelimiterUnderflow {
                    offset: offset.0,
                    delimiter: delimiter.to_string(),
                })
        })
    }

    pub fn forward_over(self, delimiters: &[&str]) -> Result<Self, ResolveError> {
        delimiters
            .iter()
            .try_fold(self, |offset, delimiter| offset.advance(delimiter.chars().count()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegationContext {
    /// The negation is the entire value of a bound attribute.
    AttributeValue { attribute: NodeId },
    Expression { absolute_offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonContext {
    /// The comparison is interpolated text directly inside an element.
    HostedInterpolation {
        bound_text: NodeId,
        interpolation: NodeId,
    },
    Expression { absolute_offset: usize },
}

fn is_transparent(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::ASTWithSource | NodeKind::ParenthesizedExpression)
}

/// Nearest ancestor that is not a wrapper node.
fn enclosing(tree: &TemplateTree, id: NodeId) -> Option<(NodeId, NodeKind)> {
    tree.ancestors(id)
        .map(|ancestor| (ancestor, tree.node(ancestor).kind))
        .find(|&(_, kind)| !is_transparent(kind))
}

/// Where the expression containing `id` starts in the file; 0 for a tree
/// without an expression wrapper.
pub fn expression_offset(tree: &TemplateTree, id: NodeId) -> usize {
    tree.ancestors(id)
        .find_map(|ancestor| match tree.node(ancestor).data {
            NodeData::Source { absolute_offset, .. } => Some(absolute_offset),
            _ => None,
        })
        .unwrap_or(0)
}

/// Context for the negation node of a match.
pub fn negation_context(tree: &TemplateTree, negation: NodeId) -> NegationContext {
    match enclosing(tree, negation) {
        Some((attribute, NodeKind::BoundAttribute)) => NegationContext::AttributeValue { attribute },
        _ => NegationContext::Expression {
            absolute_offset: expression_offset(tree, negation),
        },
    }
}

/// Context for the binary node of a match.
pub fn comparison_context(tree: &TemplateTree, binary: NodeId) -> ComparisonContext {
    let hosted = enclosing(tree, binary).and_then(|(interpolation, kind)| {
        if kind != NodeKind::Interpolation {
            return None;
        }
        let (bound_text, kind) = enclosing(tree, interpolation)?;
        if kind != NodeKind::BoundText {
            return None;
        }
        let host = tree.parent(bound_text)?;
        (tree.kind(host)? == NodeKind::Element).then_some(ComparisonContext::HostedInterpolation {
            bound_text,
            interpolation,
        })
    });
    hosted.unwrap_or_else(|| ComparisonContext::Expression {
        absolute_offset: expression_offset(tree, binary),
    })
}

fn expression_span(tree: &TemplateTree, id: NodeId) -> Result<ParseSpan, ResolveError> {
    tree.get(id)
        .ok_or(ResolveError::MissingNode(id))?
        .span
        .ok_or(ResolveError::MissingSpan { node: id })
}

/// `id`'s expression span moved into file coordinates.
fn shifted_span(tree: &TemplateTree, id: NodeId, absolute_offset: usize) -> Result<AbsoluteSourceSpan, ResolveError> {
    let span = expression_span(tree, id)?;
    span.to_absolute(absolute_offset)
        .ok_or(ResolveError::OffsetOverflow {
            offset: absolute_offset,
            by: span.end,
        })
}

fn node_source_span(tree: &TemplateTree, id: NodeId) -> Result<AbsoluteSourceSpan, ResolveError> {
    tree.get(id)
        .ok_or(ResolveError::MissingNode(id))?
        .source_span
        .ok_or(ResolveError::MissingSpan { node: id })
}

/// The attribute's value without quotes.
fn attribute_value_span(tree: &TemplateTree, attribute: NodeId) -> Result<AbsoluteSourceSpan, ResolveError> {
    let node = tree.get(attribute).ok_or(ResolveError::MissingNode(attribute))?;
    if let NodeData::BoundAttribute {
        value_span: Some(value_span),
        ..
    } = &node.data
    {
        return Ok(value_span.to_absolute());
    }
    let whole = node_source_span(tree, attribute)?;
    let start = DelimitedOffset::new(whole.start).forward_over(&[NG_IF_ATTRIBUTE_PREFIX])?;
    let end = DelimitedOffset::new(whole.end).back_over(&[ATTRIBUTE_QUOTE])?;
    Ok(AbsoluteSourceSpan::new(start.get(), end.get()))
}

pub fn resolve(tree: &TemplateTree, found: &AsyncPipeMatch) -> Result<AbsoluteSourceSpan, ResolveError> {
    match *found {
        AsyncPipeMatch::NegatedPipe { pipe, negation } => match negation_context(tree, negation) {
            NegationContext::AttributeValue { attribute } => attribute_value_span(tree, attribute),
            NegationContext::Expression { absolute_offset } => {
                // `!(value | async)`: the pipe span starts after `!(` and stops before `)`.
                let pipe_span = shifted_span(tree, pipe, absolute_offset)?;
                let start = DelimitedOffset::new(pipe_span.start).back_over(&[NEGATION, OPEN_PAREN])?;
                let end = DelimitedOffset::new(pipe_span.end).forward_over(&[CLOSE_PAREN])?;
                Ok(AbsoluteSourceSpan::new(start.get(), end.get()))
            }
        },
        AsyncPipeMatch::LooseEqualityWithFalse { pipe, binary } => match comparison_context(tree, binary) {
            ComparisonContext::HostedInterpolation {
                bound_text,
                interpolation,
            } => {
                let text_start = DelimitedOffset::new(node_source_span(tree, bound_text)?.start);
                let interpolation_span = expression_span(tree, interpolation)?;
                let pipe_span = expression_span(tree, pipe)?;
                let start = text_start
                    .advance(interpolation_span.start)?
                    .forward_over(&[INTERPOLATION_START, OPEN_PAREN])?;
                let end = text_start.advance(pipe_span.end)?.forward_over(&[CLOSE_PAREN])?;
                Ok(AbsoluteSourceSpan::new(start.get(), end.get()))
            }
            ComparisonContext::Expression { absolute_offset } => {
                // Unlike the negation case, the end steps back over `)`.
                let binary_span = shifted_span(tree, binary, absolute_offset)?;
                let start = DelimitedOffset::new(binary_span.start).back_over(&[OPEN_PAREN])?;
                let end = DelimitedOffset::new(binary_span.end).back_over(&[CLOSE_PAREN])?;
                Ok(AbsoluteSourceSpan::new(start.get(), end.get()))
            }
        },
    }
}
