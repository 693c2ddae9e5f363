//! Source Code
//!
//! File-absolute offset to line/column conversion. Lines are 1-based and
//! columns 0-based. Offsets and columns are counted in characters, the unit
//! the template parser reports, and only become byte indices when text is
//! sliced out of the file.

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::parse_util::{AbsoluteSourceSpan, ParseSourceSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

/// The text of one template file plus its line-start table.
#[derive(Debug, Clone)]
pub struct SourceCode<'src> {
    text: &'src str,
    /// Character offset of each line start; `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    /// Byte index of each character, then `text.len()` for end of file.
    char_bytes: Vec<usize>,
}

impl<'src> SourceCode<'src> {
    pub fn new(text: &'src str) -> Self {
        let mut line_starts = vec![0];
        let mut char_bytes = Vec::with_capacity(text.len() + 1);
        for (idx, (byte, ch)) in text.char_indices().enumerate() {
            char_bytes.push(byte);
            if ch == '\n' {
                line_starts.push(idx + 1);
            }
        }
        char_bytes.push(text.len());
        SourceCode {
            text,
            line_starts,
            char_bytes,
        }
    }

    pub fn text(&self) -> &'src str {
        self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Length of the file in characters.
    pub fn len(&self) -> usize {
        self.char_bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte index of the character at `offset`; `len()` maps to the end of
    /// the text.
    pub fn byte_index(&self, offset: usize) -> Option<usize> {
        self.char_bytes.get(offset).copied()
    }

    /// Offset of one past the last character is valid and maps to the end
    /// of the last line.
    pub fn get_loc_from_index(&self, offset: usize) -> Result<Position, SourceError> {
        if offset > self.len() {
            return Err(SourceError::OffsetOutOfRange {
                offset,
                len: self.len(),
            });
        }
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        };
        Ok(Position::new(line_idx + 1, offset - self.line_starts[line_idx]))
    }

    pub fn get_index_from_loc(&self, position: Position) -> Result<usize, SourceError> {
        let line_start = position
            .line
            .checked_sub(1)
            .and_then(|idx| self.line_starts.get(idx))
            .copied()
            .ok_or(SourceError::PositionOutOfRange(position))?;
        let line_end = self
            .line_starts
            .get(position.line)
            .map(|next| next - 1)
            .unwrap_or_else(|| self.len());
        if position.column > line_end - line_start {
            return Err(SourceError::PositionOutOfRange(position));
        }
        Ok(line_start + position.column)
    }

    pub fn convert_span_to_loc(&self, span: AbsoluteSourceSpan) -> Result<SourceLocation, SourceError> {
        Ok(SourceLocation {
            start: self.get_loc_from_index(span.start)?,
            end: self.get_loc_from_index(span.end)?,
        })
    }

    /// Template nodes carry their own line/column, but those come from the
    /// parser's numbering; going through the offsets keeps node locations and
    /// expression locations on the same scale.
    pub fn convert_node_source_span_to_loc(
        &self,
        span: &ParseSourceSpan,
    ) -> Result<SourceLocation, SourceError> {
        self.convert_span_to_loc(span.to_absolute())
    }

    pub fn text_of(&self, span: AbsoluteSourceSpan) -> Option<&'src str> {
        let start = self.byte_index(span.start)?;
        let end = self.byte_index(span.end)?;
        self.text.get(start..end)
    }
}
