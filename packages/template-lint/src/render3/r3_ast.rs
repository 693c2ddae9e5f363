//! Render3 AST
//!
//! Template-level nodes: elements, structural templates, text and the
//! bindings that embed expressions. Spans here are file-absolute.

use serde::{Deserialize, Serialize};

use crate::expression_parser::ast::ASTWithSource;
use crate::parse_util::ParseSourceSpan;

/// Template node, tagged by `"type"` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum R3Node {
    Element(Element),
    Template(Template),
    Text(Text),
    BoundText(BoundText),
    TextAttribute(TextAttribute),
    BoundAttribute(BoundAttribute),
    BoundEvent(BoundEvent),
}

impl R3Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            R3Node::Element(n) => &n.source_span,
            R3Node::Template(n) => &n.source_span,
            R3Node::Text(n) => &n.source_span,
            R3Node::BoundText(n) => &n.source_span,
            R3Node::TextAttribute(n) => &n.source_span,
            R3Node::BoundAttribute(n) => &n.source_span,
            R3Node::BoundEvent(n) => &n.source_span,
        }
    }
}

/// Text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// Bound text node (interpolation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundText {
    pub value: ASTWithSource,
    pub source_span: ParseSourceSpan,
}

impl BoundText {
    pub fn new(value: ASTWithSource, source_span: ParseSourceSpan) -> Self {
        BoundText { value, source_span }
    }
}

/// Text attribute in the template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttribute {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    #[serde(default)]
    pub value_span: Option<ParseSourceSpan>,
}

/// Bound attribute node
///
/// `source_span` covers the whole attribute, name and quotes included.
/// `value_span`, when the parser provides it, covers only the quoted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundAttribute {
    pub name: String,
    pub value: ASTWithSource,
    pub source_span: ParseSourceSpan,
    #[serde(default)]
    pub key_span: Option<ParseSourceSpan>,
    #[serde(default)]
    pub value_span: Option<ParseSourceSpan>,
}

impl BoundAttribute {
    pub fn new(name: impl Into<String>, value: ASTWithSource, source_span: ParseSourceSpan) -> Self {
        BoundAttribute {
            name: name.into(),
            value,
            source_span,
            key_span: None,
            value_span: None,
        }
    }

    pub fn with_value_span(mut self, value_span: ParseSourceSpan) -> Self {
        self.value_span = Some(value_span);
        self
    }
}

/// Bound event node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundEvent {
    pub name: String,
    pub handler: ASTWithSource,
    pub source_span: ParseSourceSpan,
}

/// Element node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<TextAttribute>,
    #[serde(default)]
    pub inputs: Vec<BoundAttribute>,
    #[serde(default)]
    pub outputs: Vec<BoundEvent>,
    #[serde(default)]
    pub children: Vec<R3Node>,
    pub source_span: ParseSourceSpan,
}

impl Element {
    pub fn new(name: impl Into<String>, source_span: ParseSourceSpan) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            children: Vec::new(),
            source_span,
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<BoundAttribute>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_children(mut self, children: Vec<R3Node>) -> Self {
        self.children = children;
        self
    }
}

/// Structural template (`<ng-template>` or an element carrying `*directive`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub attributes: Vec<TextAttribute>,
    #[serde(default)]
    pub inputs: Vec<BoundAttribute>,
    #[serde(default)]
    pub template_attrs: Vec<BoundAttribute>,
    #[serde(default)]
    pub children: Vec<R3Node>,
    pub source_span: ParseSourceSpan,
}

impl Template {
    pub fn new(tag_name: Option<String>, source_span: ParseSourceSpan) -> Self {
        Template {
            tag_name,
            attributes: Vec::new(),
            inputs: Vec::new(),
            template_attrs: Vec::new(),
            children: Vec::new(),
            source_span,
        }
    }

    pub fn with_template_attrs(mut self, template_attrs: Vec<BoundAttribute>) -> Self {
        self.template_attrs = template_attrs;
        self
    }

    pub fn with_children(mut self, children: Vec<R3Node>) -> Self {
        self.children = children;
        self
    }
}
