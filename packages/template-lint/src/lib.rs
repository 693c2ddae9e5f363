#![deny(clippy::all)]

/**
 * Angular Template Lint
 *
 * Lint rules over parsed Angular templates. The template and expression
 * parsers live upstream; this crate takes their output, links it into a
 * parent-aware tree, and reports rule violations with file locations.
 */

pub mod config;
pub mod diagnostic;
mod error;
pub mod linter;
pub mod parse_util;
pub mod rules;
pub mod source_code;
pub mod tree;
pub mod visitor;

// Parser output models (mirrors Angular structure)
pub mod expression_parser;
pub mod render3;

// Re-exports
pub use config::{LinterConfig, RuleLevel};
pub use diagnostic::{Diagnostic, MessageId, Severity};
pub use error::{LintError, ResolveError, Result, SourceError};
pub use linter::Linter;
pub use source_code::{Position, SourceCode, SourceLocation};
pub use tree::{NodeId, NodeKind, TemplateTree};
