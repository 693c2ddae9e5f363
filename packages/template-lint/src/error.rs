//! Error types
//!
//! [`LintError`] surfaces to callers of the linter. [`SourceError`] and
//! [`ResolveError`] stay internal to a single rule invocation: the rule logs
//! them and drops the diagnostic instead of aborting the run.

use thiserror::Error;

use crate::source_code::Position;
use crate::tree::NodeId;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("invalid node selector `{0}`")]
    InvalidSelector(String),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("failed to read template AST: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("offset {offset} is outside the source ({len} characters)")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("position {}:{} is outside the source", .0.line, .0.column)]
    PositionOutOfRange(Position),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("node {0:?} is not part of the tree")]
    MissingNode(NodeId),

    #[error("node {node:?} has no expression span")]
    MissingSpan { node: NodeId },

    #[error("cannot step back over `{delimiter}` from offset {offset}")]
    DelimiterUnderflow { offset: usize, delimiter: String },

    #[error("offset {offset} shifted by {by} overflows")]
    OffsetOverflow { offset: usize, by: usize },
}

pub type Result<T, E = LintError> = std::result::Result<T, E>;
