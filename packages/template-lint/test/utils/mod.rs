//! Template Builders for Tests
//!
//! Builds parser-shaped template nodes for a given source string, taking
//! every offset from the text itself so spans line up with what the
//! template parser would produce. Offsets are character counts, as the
//! parser reports them.

#![allow(dead_code)]

use angular_template_lint::expression_parser::ast::{ASTWithSource, LiteralValue, AST};
use angular_template_lint::parse_util::{ParseSourceSpan, ParseSpan};
use angular_template_lint::render3::r3_ast::{BoundAttribute, BoundText, Element, R3Node, Template};

/// Character offset of the first `needle` in `source`.
pub fn offset_of(source: &str, needle: &str) -> usize {
    let byte = source
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in {source:?}"));
    char_len(&source[..byte])
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Characters `start..end` of `source`.
pub fn char_slice(source: &str, start: usize, end: usize) -> String {
    source.chars().skip(start).take(end - start).collect()
}

/// `value | async` starting at expression offset `start`
pub fn value_async(start: usize) -> AST {
    AST::pipe(
        ParseSpan::new(start, start + "value | async".len()),
        AST::property_read(ParseSpan::new(start, start + "value".len()), "value"),
        "async",
    )
}

/// `value | <pipe>` starting at expression offset `start`
pub fn value_pipe(start: usize, pipe: &str) -> AST {
    AST::pipe(
        ParseSpan::new(start, start + "value | ".len() + pipe.len()),
        AST::property_read(ParseSpan::new(start, start + "value".len()), "value"),
        pipe,
    )
}

/// `!(value | async)` starting at expression offset `start`
pub fn negated_value_async(start: usize) -> AST {
    AST::prefix_not(
        ParseSpan::new(start, start + "!(value | async)".len()),
        value_async(start + "!(".len()),
    )
}

/// `(value | async) <operation> <literal_text>` starting at expression offset `start`
pub fn compare_value_async(start: usize, operation: &str, literal: LiteralValue, literal_text: &str) -> AST {
    let right_start = start + "(value | async) ".len() + operation.len() + 1;
    let right_end = right_start + char_len(literal_text);
    AST::binary(
        ParseSpan::new(start, right_end),
        operation,
        value_async(start + 1),
        AST::literal(ParseSpan::new(right_start, right_end), literal),
    )
}

/// The `name="..."` attribute in `source` bound to `expression`. The value
/// span is left out, as older parsers do.
pub fn bound_attribute(source: &str, name: &str, expression: AST) -> BoundAttribute {
    let attr_start = offset_of(source, &format!("{name}=\""));
    let value_start = attr_start + char_len(name) + 2;
    let value_end = value_start + offset_of(&char_slice(source, value_start, char_len(source)), "\"");
    BoundAttribute::new(
        name.trim_start_matches('*'),
        ASTWithSource::new(expression, Some(char_slice(source, value_start, value_end)), value_start),
        ParseSourceSpan::from_offsets(attr_start, value_end + 1),
    )
}

/// Same as [`bound_attribute`], with the parser-provided value span.
pub fn bound_attribute_with_value_span(source: &str, name: &str, expression: AST) -> BoundAttribute {
    let attr = bound_attribute(source, name, expression);
    let value_start = attr.value.absolute_offset;
    let value_end = attr.source_span.end.offset - 1;
    attr.with_value_span(ParseSourceSpan::from_offsets(value_start, value_end))
}

/// `<tag *ngIf="...">...</tag>`, which the parser turns into a template.
pub fn ng_if_template(source: &str, tag: &str, condition: AST) -> R3Node {
    let start = offset_of(source, &format!("<{tag}"));
    let end = source
        .rfind(&format!("</{tag}>"))
        .map(|byte| char_len(&source[..byte]) + char_len(tag) + 3)
        .unwrap_or_else(|| char_len(source));
    let span = ParseSourceSpan::from_offsets(start, end);
    let element = Element::new(tag, span.clone());
    let template = Template::new(Some(tag.to_string()), span)
        .with_template_attrs(vec![bound_attribute(source, "*ngIf", condition)])
        .with_children(vec![R3Node::Element(element)]);
    R3Node::Template(template)
}

/// The `{{ ... }}` text found at `text` in `source`, holding `expressions`
/// with spans relative to the opening braces.
pub fn bound_text(source: &str, text: &str, expressions: Vec<AST>) -> BoundText {
    let start = offset_of(source, text);
    let end = start + char_len(text);
    let interpolation = AST::interpolation(
        ParseSpan::new(0, char_len(text)),
        vec![String::new(); expressions.len() + 1],
        expressions,
    );
    BoundText::new(
        ASTWithSource::new(interpolation, Some(text.to_string()), start),
        ParseSourceSpan::from_offsets(start, end),
    )
}

/// `<tag>` spanning all of `source`, with the given children.
pub fn element(source: &str, tag: &str, children: Vec<R3Node>) -> R3Node {
    R3Node::Element(
        Element::new(tag, ParseSourceSpan::from_offsets(0, char_len(source))).with_children(children),
    )
}
