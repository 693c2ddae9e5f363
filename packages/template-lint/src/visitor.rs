//! Template Body Visitor
//!
//! The traversal hook rules are attached through: callbacks keyed by an
//! ESLint-style node selector, invoked once per matching node in pre-order.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LintError;
use crate::tree::{Node, NodeId, NodeKind, TemplateTree};

static SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*([A-Za-z]+)\s*(?:\[\s*([A-Za-z]+)\s*=\s*["']?([^\]"']+?)["']?\s*\])?\s*$"#)
        .unwrap()
});

/// `Kind` or `Kind[attribute=value]`, e.g. `BindingPipe[name=async]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSelector {
    pub kind: NodeKind,
    pub attribute: Option<(String, String)>,
}

impl NodeSelector {
    pub fn kind(kind: NodeKind) -> Self {
        NodeSelector { kind, attribute: None }
    }

    pub fn with_attribute(kind: NodeKind, attr: impl Into<String>, value: impl Into<String>) -> Self {
        NodeSelector {
            kind,
            attribute: Some((attr.into(), value.into())),
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        if node.kind != self.kind {
            return false;
        }
        match &self.attribute {
            Some((attr, value)) => node.attribute(attr) == Some(value.as_str()),
            None => true,
        }
    }
}

impl FromStr for NodeSelector {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LintError::InvalidSelector(s.to_string());
        let caps = SELECTOR_RE.captures(s).ok_or_else(invalid)?;
        let kind = caps[1].parse::<NodeKind>().map_err(|_| invalid())?;
        let attribute = match (caps.get(2), caps.get(3)) {
            (Some(attr), Some(value)) => Some((attr.as_str().to_string(), value.as_str().to_string())),
            _ => None,
        };
        Ok(NodeSelector { kind, attribute })
    }
}

impl fmt::Display for NodeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some((attr, value)) => write!(f, "{}[{}={}]", self.kind, attr, value),
            None => write!(f, "{}", self.kind),
        }
    }
}

type Handler<'a> = Box<dyn FnMut(&TemplateTree, NodeId) + 'a>;

#[derive(Default)]
pub struct TemplateBodyVisitor<'a> {
    handlers: Vec<(NodeSelector, Handler<'a>)>,
}

impl<'a> TemplateBodyVisitor<'a> {
    pub fn new() -> Self {
        TemplateBodyVisitor { handlers: Vec::new() }
    }

    pub fn on(&mut self, selector: NodeSelector, handler: impl FnMut(&TemplateTree, NodeId) + 'a) {
        self.handlers.push((selector, Box::new(handler)));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handlers matching the same node run in registration order.
    pub fn visit(&mut self, tree: &TemplateTree) {
        for (id, node) in tree.iter() {
            for (selector, handler) in self.handlers.iter_mut() {
                if selector.matches(node) {
                    handler(tree, id);
                }
            }
        }
    }
}
