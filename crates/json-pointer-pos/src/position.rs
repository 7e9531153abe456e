//! Byte offset to line/column conversion.

use serde::{Deserialize, Serialize};

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Unit columns are counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnUnit {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// UTF-16 code units, as used by LSP clients and JavaScript tooling.
    Utf16,
    /// UTF-8 bytes.
    Bytes,
}

impl ColumnUnit {
    fn measure(self, s: &str) -> usize {
        match self {
            ColumnUnit::Chars => s.chars().count(),
            ColumnUnit::Utf16 => s.encode_utf16().count(),
            ColumnUnit::Bytes => s.len(),
        }
    }
}

/// Line start offsets of a text, computed in one pass.
///
/// Only `\n` starts a new line; a `\r` before it is part of the previous
/// line's columns.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// `line_starts[n]` is the byte offset of line `n + 1`.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a position.
    ///
    /// Returns `None` if the offset is past the end of the text or does not
    /// fall on a character boundary.
    ///
    /// # Example
    ///
    /// ```
    /// use json_pointer_pos::{ColumnUnit, LineIndex, Position};
    ///
    /// let index = LineIndex::new("{\n  \"é\": 1\n}");
    /// assert_eq!(index.position(10, ColumnUnit::Chars), Some(Position::new(2, 8)));
    /// assert_eq!(index.position(10, ColumnUnit::Bytes), Some(Position::new(2, 9)));
    /// ```
    pub fn position(&self, offset: usize, unit: ColumnUnit) -> Option<Position> {
        let line = self.line_of(offset)?;
        let line_start = self.line_starts[line - 1];
        let column = unit.measure(&self.text[line_start..offset]) + 1;
        Some(Position { line, column })
    }

    /// Converts many offsets at once, in any order.
    ///
    /// Offsets are visited in increasing order and each column is counted
    /// from the previous offset on the same line, so the text is measured
    /// at most once overall. Entry `i` of the result belongs to `offsets[i]`.
    pub fn positions(&self, offsets: &[usize], unit: ColumnUnit) -> Vec<Option<Position>> {
        let mut order: Vec<usize> = (0..offsets.len()).collect();
        order.sort_by_key(|&i| offsets[i]);

        let mut out = vec![None; offsets.len()];
        // line, byte offset and column of the last converted offset
        let mut last: Option<(usize, usize, usize)> = None;
        for i in order {
            let offset = offsets[i];
            let Some(line) = self.line_of(offset) else {
                continue;
            };
            let (from, column) = match last {
                Some((last_line, at, column)) if last_line == line => (at, column),
                _ => (self.line_starts[line - 1], 1),
            };
            let column = column + unit.measure(&self.text[from..offset]);
            last = Some((line, offset, column));
            out[i] = Some(Position { line, column });
        }
        out
    }

    /// 1-based line containing `offset`, if it is a valid character boundary.
    fn line_of(&self, offset: usize) -> Option<usize> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return None;
        }
        Some(self.line_starts.partition_point(|&start| start <= offset))
    }
}
