use std::fmt::Display;

/// Byte range of a piece of source together with the 1-based line and column
/// of its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub col: u32,
}

impl SrcSpan {
    pub fn from(start: u32, end: u32, line: u32, col: u32) -> Self {
        Self { start, end, line, col }
    }

    /// Span covering `self` up to the end of `other`, positioned at `self`.
    pub fn to(&self, other: SrcSpan) -> Self {
        Self {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            col: self.col,
        }
    }
}

impl Display for SrcSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
