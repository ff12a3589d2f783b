//! Byte offset → row/column conversion.

use std::fmt;

/// Zero-based row and byte column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Start offsets of every line in a source text.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        LineIndex {
            line_starts,
            len: source.len() as u32,
        }
    }

    /// Offsets past the end clamp to the end of the text.
    pub fn point(&self, offset: u32) -> Point {
        let offset = offset.min(self.len);
        let row = match self.line_starts.binary_search(&offset) {
            Ok(row) => row,
            Err(next) => next - 1,
        };
        Point {
            row: row as u32,
            column: offset - self.line_starts[row],
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
