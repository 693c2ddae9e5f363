//! Template Tree
//!
//! The template AST and the expression ASTs embedded in it, lowered into a
//! single arena with parent back-links. Rules receive a [`NodeId`] and walk
//! upward through [`TemplateTree::ancestors`]; nothing here is mutable once
//! the tree is built.
//!
//! Nesting follows the parser output:
//!
//! ```text
//! Root
//! └─ Element | Template
//!    ├─ BoundAttribute ── ASTWithSource ── <expression nodes>
//!    └─ BoundText ─────── ASTWithSource ── Interpolation ── <expression nodes>
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use smallvec::SmallVec;

use crate::expression_parser::ast::{ASTWithSource, LiteralValue, AST};
use crate::parse_util::{AbsoluteSourceSpan, ParseSourceSpan, ParseSpan};
use crate::render3::r3_ast::{BoundAttribute, BoundEvent, R3Node, TextAttribute};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

macro_rules! node_kinds {
    ($($kind:ident),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum NodeKind {
            $($kind),*
        }

        impl NodeKind {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind)),*
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($kind) => Ok(NodeKind::$kind),)*
                    _ => Err(()),
                }
            }
        }
    };
}

node_kinds! {
    Root,
    // Template nodes
    Element,
    Template,
    Text,
    BoundText,
    TextAttribute,
    BoundAttribute,
    BoundEvent,
    ASTWithSource,
    // Expression nodes
    EmptyExpr,
    ImplicitReceiver,
    ThisReceiver,
    PropertyRead,
    SafePropertyRead,
    KeyedRead,
    Call,
    SafeCall,
    BindingPipe,
    LiteralPrimitive,
    LiteralArray,
    LiteralMap,
    Interpolation,
    Binary,
    PrefixNot,
    Unary,
    Conditional,
    NonNullAssert,
    Chain,
    ParenthesizedExpression,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind payload. Kinds with nothing the linter needs carry `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    None,
    /// Element tag, pipe name, property name, event name
    Named(String),
    Template {
        tag_name: Option<String>,
    },
    Text(String),
    TextAttribute {
        name: String,
        value: String,
    },
    BoundAttribute {
        name: String,
        value_span: Option<ParseSourceSpan>,
    },
    Source {
        source: Option<String>,
        absolute_offset: usize,
    },
    Binary {
        operation: String,
        left: NodeId,
        right: NodeId,
    },
    Unary {
        operator: String,
    },
    Literal(LiteralValue),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    /// Expression-relative span, expression nodes only.
    pub span: Option<ParseSpan>,
    /// File-absolute span. For expression nodes this is the parser's own
    /// value when it supplied one, else `span` shifted by the enclosing
    /// expression's offset, or `None` if that shift overflows.
    pub source_span: Option<AbsoluteSourceSpan>,
}

impl Node {
    /// Value of an ESLint-style selector attribute (`name`, `operation`, ...)
    pub fn attribute(&self, attr: &str) -> Option<&str> {
        match (attr, &self.data) {
            ("name", NodeData::Named(name))
            | ("name", NodeData::BoundAttribute { name, .. })
            | ("name", NodeData::TextAttribute { name, .. }) => Some(name),
            ("tagName", NodeData::Template { tag_name }) => tag_name.as_deref(),
            ("value", NodeData::TextAttribute { value, .. }) | ("value", NodeData::Text(value)) => {
                Some(value)
            }
            ("operation", NodeData::Binary { operation, .. }) => Some(operation),
            ("operator", NodeData::Unary { operator }) => Some(operator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateTree {
    nodes: Vec<Node>,
}

impl TemplateTree {
    pub fn from_nodes(nodes: &[R3Node]) -> Self {
        let mut builder = TreeBuilder::new();
        let root = builder.push(NodeKind::Root, NodeData::None, None, None, None);
        for node in nodes {
            builder.lower_r3(node, root);
        }
        builder.finish()
    }

    /// Tree for a lone binding expression, with no template around it.
    pub fn from_expression(expression: &ASTWithSource) -> Self {
        let mut builder = TreeBuilder::new();
        let root = builder.push(NodeKind::Root, NodeData::None, None, None, None);
        builder.lower_source(expression, root);
        builder.finish()
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Panics on an id from another tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|node| node.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Parent, grandparent, ... up to and including the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// `nth_ancestor(id, 1)` is the parent.
    pub fn nth_ancestor(&self, id: NodeId, n: usize) -> Option<NodeId> {
        if n == 0 {
            return self.get(id).map(|_| id);
        }
        self.ancestors(id).nth(n - 1)
    }

    /// All nodes in pre-order, which is also arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx as u32), node))
    }
}

pub struct Ancestors<'a> {
    tree: &'a TemplateTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder { nodes: Vec::new() }
    }

    fn finish(self) -> TemplateTree {
        TemplateTree { nodes: self.nodes }
    }

    fn push(
        &mut self,
        kind: NodeKind,
        data: NodeData,
        parent: Option<NodeId>,
        span: Option<ParseSpan>,
        source_span: Option<AbsoluteSourceSpan>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            data,
            parent,
            children: SmallVec::new(),
            span,
            source_span,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn lower_r3(&mut self, node: &R3Node, parent: NodeId) -> NodeId {
        let source_span = Some(node.source_span().to_absolute());
        match node {
            R3Node::Element(el) => {
                let id = self.push(
                    NodeKind::Element,
                    NodeData::Named(el.name.clone()),
                    Some(parent),
                    None,
                    source_span,
                );
                for attr in &el.attributes {
                    self.lower_text_attribute(attr, id);
                }
                for input in &el.inputs {
                    self.lower_bound_attribute(input, id);
                }
                for output in &el.outputs {
                    self.lower_bound_event(output, id);
                }
                for child in &el.children {
                    self.lower_r3(child, id);
                }
                id
            }
            R3Node::Template(tpl) => {
                let id = self.push(
                    NodeKind::Template,
                    NodeData::Template {
                        tag_name: tpl.tag_name.clone(),
                    },
                    Some(parent),
                    None,
                    source_span,
                );
                for attr in &tpl.attributes {
                    self.lower_text_attribute(attr, id);
                }
                for input in tpl.inputs.iter().chain(&tpl.template_attrs) {
                    self.lower_bound_attribute(input, id);
                }
                for child in &tpl.children {
                    self.lower_r3(child, id);
                }
                id
            }
            R3Node::Text(text) => self.push(
                NodeKind::Text,
                NodeData::Text(text.value.clone()),
                Some(parent),
                None,
                source_span,
            ),
            R3Node::BoundText(text) => {
                let id = self.push(NodeKind::BoundText, NodeData::None, Some(parent), None, source_span);
                self.lower_source(&text.value, id);
                id
            }
            R3Node::TextAttribute(attr) => self.lower_text_attribute(attr, parent),
            R3Node::BoundAttribute(attr) => self.lower_bound_attribute(attr, parent),
            R3Node::BoundEvent(event) => self.lower_bound_event(event, parent),
        }
    }

    fn lower_text_attribute(&mut self, attr: &TextAttribute, parent: NodeId) -> NodeId {
        self.push(
            NodeKind::TextAttribute,
            NodeData::TextAttribute {
                name: attr.name.clone(),
                value: attr.value.clone(),
            },
            Some(parent),
            None,
            Some(attr.source_span.to_absolute()),
        )
    }

    fn lower_bound_attribute(&mut self, attr: &BoundAttribute, parent: NodeId) -> NodeId {
        let id = self.push(
            NodeKind::BoundAttribute,
            NodeData::BoundAttribute {
                name: attr.name.clone(),
                value_span: attr.value_span.clone(),
            },
            Some(parent),
            None,
            Some(attr.source_span.to_absolute()),
        );
        self.lower_source(&attr.value, id);
        id
    }

    fn lower_bound_event(&mut self, event: &BoundEvent, parent: NodeId) -> NodeId {
        let id = self.push(
            NodeKind::BoundEvent,
            NodeData::Named(event.name.clone()),
            Some(parent),
            None,
            Some(event.source_span.to_absolute()),
        );
        self.lower_source(&event.handler, id);
        id
    }

    fn lower_source(&mut self, source: &ASTWithSource, parent: NodeId) -> NodeId {
        let span = source.ast.span();
        let id = self.push(
            NodeKind::ASTWithSource,
            NodeData::Source {
                source: source.source.clone(),
                absolute_offset: source.absolute_offset,
            },
            Some(parent),
            Some(span),
            span.to_absolute(source.absolute_offset),
        );
        self.lower_expr(&source.ast, id, source.absolute_offset);
        id
    }

    fn lower_expr(&mut self, ast: &AST, parent: NodeId, absolute_offset: usize) -> NodeId {
        let span = ast.span();
        let source_span = ast.source_span().or_else(|| span.to_absolute(absolute_offset));
        let (kind, data) = match ast {
            AST::EmptyExpr(_) => (NodeKind::EmptyExpr, NodeData::None),
            AST::ImplicitReceiver(_) => (NodeKind::ImplicitReceiver, NodeData::None),
            AST::ThisReceiver(_) => (NodeKind::ThisReceiver, NodeData::None),
            AST::PropertyRead(p) => (NodeKind::PropertyRead, NodeData::Named(p.name.clone())),
            AST::SafePropertyRead(p) => {
                (NodeKind::SafePropertyRead, NodeData::Named(p.name.clone()))
            }
            AST::KeyedRead(_) => (NodeKind::KeyedRead, NodeData::None),
            AST::Call(_) => (NodeKind::Call, NodeData::None),
            AST::SafeCall(_) => (NodeKind::SafeCall, NodeData::None),
            AST::BindingPipe(p) => (NodeKind::BindingPipe, NodeData::Named(p.name.clone())),
            AST::LiteralPrimitive(lit) => {
                (NodeKind::LiteralPrimitive, NodeData::Literal(lit.value.clone()))
            }
            AST::LiteralArray(_) => (NodeKind::LiteralArray, NodeData::None),
            AST::LiteralMap(_) => (NodeKind::LiteralMap, NodeData::None),
            AST::Interpolation(_) => (NodeKind::Interpolation, NodeData::None),
            // Filled in once both operands have ids.
            AST::Binary(_) => (NodeKind::Binary, NodeData::None),
            AST::PrefixNot(_) => (NodeKind::PrefixNot, NodeData::None),
            AST::Unary(u) => (
                NodeKind::Unary,
                NodeData::Unary {
                    operator: u.operator.clone(),
                },
            ),
            AST::Conditional(_) => (NodeKind::Conditional, NodeData::None),
            AST::NonNullAssert(_) => (NodeKind::NonNullAssert, NodeData::None),
            AST::Chain(_) => (NodeKind::Chain, NodeData::None),
            AST::ParenthesizedExpression(_) => (NodeKind::ParenthesizedExpression, NodeData::None),
        };
        let id = self.push(kind, data, Some(parent), Some(span), source_span);

        let children: SmallVec<[NodeId; 4]> = ast
            .children()
            .into_iter()
            .map(|child| self.lower_expr(child, id, absolute_offset))
            .collect();

        if let AST::Binary(binary) = ast {
            self.nodes[id.index()].data = NodeData::Binary {
                operation: binary.operation.clone(),
                left: children[0],
                right: children[1],
            };
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render3::r3_ast::{BoundText, Element};

    fn interpolation_tree() -> TemplateTree {
        // <div>{{ a == false }}</div>
        let binary = AST::binary(
            ParseSpan::new(3, 13),
            "==",
            AST::property_read(ParseSpan::new(3, 4), "a"),
            AST::literal(ParseSpan::new(8, 13), LiteralValue::Boolean(false)),
        );
        let interpolation = AST::interpolation(
            ParseSpan::new(0, 16),
            vec!["".into(), "".into()],
            vec![binary],
        );
        let text = BoundText::new(
            ASTWithSource::new(interpolation, None, 5),
            ParseSourceSpan::from_offsets(5, 21),
        );
        let div = Element::new("div", ParseSourceSpan::from_offsets(0, 27))
            .with_children(vec![R3Node::BoundText(text)]);
        TemplateTree::from_nodes(&[R3Node::Element(div)])
    }

    #[test]
    fn test_parent_links_and_preorder() {
        let tree = interpolation_tree();
        let kinds: Vec<NodeKind> = tree.iter().map(|(_, node)| node.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Root,
                NodeKind::Element,
                NodeKind::BoundText,
                NodeKind::ASTWithSource,
                NodeKind::Interpolation,
                NodeKind::Binary,
                NodeKind::PropertyRead,
                NodeKind::ImplicitReceiver,
                NodeKind::LiteralPrimitive,
            ]
        );
        for (id, node) in tree.iter().skip(1) {
            let parent = node.parent.unwrap();
            assert!(tree.node(parent).children.contains(&id));
        }
    }

    #[test]
    fn test_binary_operands_resolved() {
        let tree = interpolation_tree();
        let (binary_id, binary) = tree
            .iter()
            .find(|(_, node)| node.kind == NodeKind::Binary)
            .unwrap();
        match &binary.data {
            NodeData::Binary { operation, left, right } => {
                assert_eq!(operation, "==");
                assert_eq!(tree.kind(*left), Some(NodeKind::PropertyRead));
                assert_eq!(tree.kind(*right), Some(NodeKind::LiteralPrimitive));
                assert_eq!(tree.parent(*right), Some(binary_id));
            }
            other => panic!("Expected binary data, got {:?}", other),
        }
        assert_eq!(binary.attribute("operation"), Some("=="));
    }

    #[test]
    fn test_expression_source_span_is_shifted() {
        let tree = interpolation_tree();
        let (_, literal) = tree
            .iter()
            .find(|(_, node)| node.kind == NodeKind::LiteralPrimitive)
            .unwrap();
        assert_eq!(literal.span, Some(ParseSpan::new(8, 13)));
        assert_eq!(literal.source_span, Some(AbsoluteSourceSpan::new(13, 18)));
    }

    #[test]
    fn test_nth_ancestor() {
        let tree = interpolation_tree();
        let (literal, _) = tree
            .iter()
            .find(|(_, node)| node.kind == NodeKind::LiteralPrimitive)
            .unwrap();
        assert_eq!(tree.nth_ancestor(literal, 0), Some(literal));
        assert_eq!(tree.kind(tree.nth_ancestor(literal, 1).unwrap()), Some(NodeKind::Binary));
        assert_eq!(tree.kind(tree.nth_ancestor(literal, 5).unwrap()), Some(NodeKind::Element));
        assert_eq!(tree.nth_ancestor(literal, 6), Some(tree.root()));
        assert_eq!(tree.nth_ancestor(literal, 7), None);
    }

    #[test]
    fn test_overflowing_offset_leaves_span_unset() {
        let ast = AST::prefix_not(ParseSpan::new(0, 16), AST::property_read(ParseSpan::new(2, 7), "value"));
        let tree = TemplateTree::from_expression(&ASTWithSource::new(ast, None, usize::MAX));
        let (_, read) = tree
            .iter()
            .find(|(_, node)| node.kind == NodeKind::PropertyRead)
            .unwrap();
        assert_eq!(read.span, Some(ParseSpan::new(2, 7)));
        assert_eq!(read.source_span, None);
    }

    #[test]
    fn test_node_kind_round_trips_through_str() {
        for kind in [NodeKind::BindingPipe, NodeKind::BoundAttribute, NodeKind::ASTWithSource] {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(kind));
        }
        assert!("Pipe".parse::<NodeKind>().is_err());
    }
}
