//! Parse Utilities
//!
//! Span types shared by the expression AST and the template AST.
//! Expression nodes carry a [`ParseSpan`] relative to the expression string
//! they were parsed from; template nodes carry a file-absolute
//! [`ParseSourceSpan`].

use serde::{Deserialize, Serialize};

/// Offsets relative to the start of a single expression string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }

    /// `None` when the shifted span would not fit in `usize`.
    pub fn to_absolute(&self, absolute_offset: usize) -> Option<AbsoluteSourceSpan> {
        Some(AbsoluteSourceSpan::new(
            absolute_offset.checked_add(self.start)?,
            absolute_offset.checked_add(self.end)?,
        ))
    }
}

/// Character offsets into the whole source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsoluteSourceSpan {
    pub start: usize,
    pub end: usize,
}

impl AbsoluteSourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        AbsoluteSourceSpan { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A location in the source file.
///
/// Only `offset` is authoritative. `line` and `col` are whatever the parser
/// reported and may be absent on input; location math always goes back
/// through the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseLocation {
    pub offset: usize,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub col: usize,
}

impl ParseLocation {
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { offset, line, col }
    }

    pub fn at(offset: usize) -> Self {
        ParseLocation { offset, line: 0, col: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end, details: None }
    }

    pub fn from_offsets(start: usize, end: usize) -> Self {
        ParseSourceSpan::new(ParseLocation::at(start), ParseLocation::at(end))
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    pub fn to_absolute(&self) -> AbsoluteSourceSpan {
        AbsoluteSourceSpan::new(self.start.offset, self.end.offset)
    }
}
