/**
 * Angular Expression AST
 *
 * The node shapes produced by the template expression parser, as handed to
 * the linter. Every node carries a span relative to the expression string it
 * was parsed from, and optionally the file-absolute span the parser computed.
 */

use serde::{Deserialize, Serialize};

use crate::parse_util::{AbsoluteSourceSpan, ParseSpan};

/// Main AST enum containing all node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AST {
    EmptyExpr(Leaf),
    ImplicitReceiver(Leaf),
    ThisReceiver(Leaf),
    PropertyRead(PropertyRead),
    SafePropertyRead(PropertyRead),
    KeyedRead(KeyedRead),
    Call(Call),
    SafeCall(Call),
    BindingPipe(BindingPipe),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    LiteralMap(LiteralMap),
    Interpolation(Interpolation),
    Binary(Binary),
    PrefixNot(Wrapped),
    Unary(Unary),
    Conditional(Conditional),
    NonNullAssert(Wrapped),
    Chain(Chain),
    ParenthesizedExpression(Wrapped),
}

/// Nodes without children or payload (`EmptyExpr`, receivers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
}

/// Nodes wrapping a single expression (`!expr`, `expr!`, `(expr)`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wrapped {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub expression: Box<AST>,
}

/// Property read (e.g., `obj.property`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRead {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub receiver: Box<AST>,
    pub name: String,
}

/// Keyed read (e.g., `obj[key]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedRead {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

/// Function call (e.g., `fn(a, b)` or `fn?.(a, b)`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub receiver: Box<AST>,
    #[serde(default)]
    pub args: Vec<AST>,
}

/// Pipe binding (e.g., `value | pipeName:arg1:arg2`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingPipe {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub exp: Box<AST>,
    pub name: String,
    #[serde(default)]
    pub args: Vec<AST>,
}

/// Run-time value of a literal primitive.
///
/// A missing `value` field deserializes as `Undefined`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Null,
    #[default]
    #[serde(skip_deserializing)]
    Undefined,
}

impl LiteralValue {
    pub fn is_false(&self) -> bool {
        matches!(self, LiteralValue::Boolean(false))
    }
}

/// Literal primitive (string, number, boolean, null, undefined)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    #[serde(default)]
    pub value: LiteralValue,
}

/// Array literal (e.g., `[1, 2, 3]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralArray {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub expressions: Vec<AST>,
}

/// Map literal key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralMapKey {
    pub key: String,
    #[serde(default)]
    pub quoted: bool,
}

/// Object literal (e.g., `{a: 1, b: 2}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralMap {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub keys: Vec<LiteralMapKey>,
    pub values: Vec<AST>,
}

/// Interpolation (`{{a}} text {{b}}`)
///
/// Spans of the interpolated expressions count from the start of the whole
/// text, opening braces included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpolation {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    #[serde(default)]
    pub strings: Vec<String>,
    pub expressions: Vec<AST>,
}

/// Binary operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binary {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

/// Unary operator (e.g., `+expr`, `-expr`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unary {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub operator: String,
    pub expr: Box<AST>,
}

/// Ternary conditional (e.g., `condition ? a : b`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// Chain of expressions (e.g., `a; b; c`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub span: ParseSpan,
    #[serde(default)]
    pub source_span: Option<AbsoluteSourceSpan>,
    pub expressions: Vec<AST>,
}

/// A whole parsed expression and where its text starts in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ASTWithSource {
    pub ast: Box<AST>,
    #[serde(default)]
    pub source: Option<String>,
    pub absolute_offset: usize,
}

impl ASTWithSource {
    pub fn new(ast: AST, source: Option<String>, absolute_offset: usize) -> Self {
        ASTWithSource {
            ast: Box::new(ast),
            source,
            absolute_offset,
        }
    }
}

// Helper constructors
impl AST {
    pub fn implicit_receiver(span: ParseSpan) -> AST {
        AST::ImplicitReceiver(Leaf { span, source_span: None })
    }

    /// `name` read off the implicit receiver, the common `value` in `value | async`
    pub fn property_read(span: ParseSpan, name: impl Into<String>) -> AST {
        AST::PropertyRead(PropertyRead {
            span,
            source_span: None,
            receiver: Box::new(AST::implicit_receiver(ParseSpan::new(span.start, span.start))),
            name: name.into(),
        })
    }

    pub fn pipe(span: ParseSpan, exp: AST, name: impl Into<String>) -> AST {
        AST::BindingPipe(BindingPipe {
            span,
            source_span: None,
            exp: Box::new(exp),
            name: name.into(),
            args: Vec::new(),
        })
    }

    pub fn prefix_not(span: ParseSpan, expression: AST) -> AST {
        AST::PrefixNot(Wrapped {
            span,
            source_span: None,
            expression: Box::new(expression),
        })
    }

    pub fn parenthesized(span: ParseSpan, expression: AST) -> AST {
        AST::ParenthesizedExpression(Wrapped {
            span,
            source_span: None,
            expression: Box::new(expression),
        })
    }

    pub fn binary(span: ParseSpan, operation: impl Into<String>, left: AST, right: AST) -> AST {
        AST::Binary(Binary {
            span,
            source_span: None,
            operation: operation.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn literal(span: ParseSpan, value: LiteralValue) -> AST {
        AST::LiteralPrimitive(LiteralPrimitive {
            span,
            source_span: None,
            value,
        })
    }

    pub fn interpolation(span: ParseSpan, strings: Vec<String>, expressions: Vec<AST>) -> AST {
        AST::Interpolation(Interpolation {
            span,
            source_span: None,
            strings,
            expressions,
        })
    }
}

impl AST {
    pub fn span(&self) -> ParseSpan {
        match self {
            AST::EmptyExpr(e) | AST::ImplicitReceiver(e) | AST::ThisReceiver(e) => e.span,
            AST::PropertyRead(e) | AST::SafePropertyRead(e) => e.span,
            AST::KeyedRead(e) => e.span,
            AST::Call(e) | AST::SafeCall(e) => e.span,
            AST::BindingPipe(e) => e.span,
            AST::LiteralPrimitive(e) => e.span,
            AST::LiteralArray(e) => e.span,
            AST::LiteralMap(e) => e.span,
            AST::Interpolation(e) => e.span,
            AST::Binary(e) => e.span,
            AST::PrefixNot(e) | AST::NonNullAssert(e) | AST::ParenthesizedExpression(e) => e.span,
            AST::Unary(e) => e.span,
            AST::Conditional(e) => e.span,
            AST::Chain(e) => e.span,
        }
    }

    pub fn source_span(&self) -> Option<AbsoluteSourceSpan> {
        match self {
            AST::EmptyExpr(e) | AST::ImplicitReceiver(e) | AST::ThisReceiver(e) => e.source_span,
            AST::PropertyRead(e) | AST::SafePropertyRead(e) => e.source_span,
            AST::KeyedRead(e) => e.source_span,
            AST::Call(e) | AST::SafeCall(e) => e.source_span,
            AST::BindingPipe(e) => e.source_span,
            AST::LiteralPrimitive(e) => e.source_span,
            AST::LiteralArray(e) => e.source_span,
            AST::LiteralMap(e) => e.source_span,
            AST::Interpolation(e) => e.source_span,
            AST::Binary(e) => e.source_span,
            AST::PrefixNot(e) | AST::NonNullAssert(e) | AST::ParenthesizedExpression(e) => {
                e.source_span
            }
            AST::Unary(e) => e.source_span,
            AST::Conditional(e) => e.source_span,
            AST::Chain(e) => e.source_span,
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<&AST> {
        match self {
            AST::EmptyExpr(_)
            | AST::ImplicitReceiver(_)
            | AST::ThisReceiver(_)
            | AST::LiteralPrimitive(_) => Vec::new(),
            AST::PropertyRead(p) | AST::SafePropertyRead(p) => vec![&*p.receiver],
            AST::KeyedRead(k) => vec![&*k.receiver, &*k.key],
            AST::Call(c) | AST::SafeCall(c) => {
                let mut children = vec![&*c.receiver];
                children.extend(c.args.iter());
                children
            }
            AST::BindingPipe(p) => {
                let mut children = vec![&*p.exp];
                children.extend(p.args.iter());
                children
            }
            AST::LiteralArray(a) => a.expressions.iter().collect(),
            AST::LiteralMap(m) => m.values.iter().collect(),
            AST::Interpolation(i) => i.expressions.iter().collect(),
            AST::Binary(b) => vec![&*b.left, &*b.right],
            AST::PrefixNot(w) | AST::NonNullAssert(w) | AST::ParenthesizedExpression(w) => {
                vec![&*w.expression]
            }
            AST::Unary(u) => vec![&*u.expr],
            AST::Conditional(c) => vec![&*c.condition, &*c.true_exp, &*c.false_exp],
            AST::Chain(c) => c.expressions.iter().collect(),
        }
    }
}
