//! Source positions and ranges.
//!
//! Positions come from the external parser; this crate never sees source
//! text, so there is no offset arithmetic here.

use std::fmt;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Create from 1-indexed line and column (as displayed to users).
    #[inline]
    pub const fn from_one_indexed(line: u32, col: u32) -> Self {
        Self {
            line: line.saturating_sub(1),
            col: col.saturating_sub(1),
        }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// Get 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// A start/end range in a module.
///
/// Ordered by start, then end, which is the "source order" used when
/// sorting diagnostics and references.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
pub struct Span {
    pub start: LineCol,
    pub end: LineCol,
}

impl Span {
    /// A span covering `start..end`.
    #[inline]
    pub const fn new(start: LineCol, end: LineCol) -> Self {
        Self { start, end }
    }

    /// A zero-width span at a 0-indexed position.
    #[inline]
    pub const fn point(line: u32, col: u32) -> Self {
        let pos = LineCol::new(line, col);
        Self { start: pos, end: pos }
    }

    /// Check whether a position falls inside this span (inclusive).
    pub fn contains(&self, pos: LineCol) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{:?}", self.start)
        } else {
            write!(f, "{:?}-{:?}", self.start, self.end)
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_display() {
        let pos = LineCol::new(0, 0);
        assert_eq!(format!("{}", pos), "1:1");

        let pos = LineCol::new(5, 10);
        assert_eq!(format!("{}", pos), "6:11");
    }

    #[test]
    fn test_line_col_from_one_indexed() {
        let pos = LineCol::from_one_indexed(1, 1);
        assert_eq!(pos.line, 0);
        assert_eq!(pos.col, 0);

        // 0 is clamped rather than underflowing
        assert_eq!(LineCol::from_one_indexed(0, 0), LineCol::new(0, 0));
    }

    #[test]
    fn test_span_ordering_is_source_order() {
        let a = Span::point(1, 4);
        let b = Span::point(1, 10);
        let c = Span::point(3, 0);

        let mut spans = vec![c, a, b];
        spans.sort();
        assert_eq!(spans, vec![a, b, c]);
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(LineCol::new(2, 4), LineCol::new(4, 1));

        assert!(span.contains(LineCol::new(2, 4)));
        assert!(span.contains(LineCol::new(3, 80)));
        assert!(span.contains(LineCol::new(4, 1)));
        assert!(!span.contains(LineCol::new(2, 3)));
        assert!(!span.contains(LineCol::new(4, 2)));
    }

    #[test]
    fn test_span_debug() {
        assert_eq!(format!("{:?}", Span::point(0, 0)), "1:1");
        assert_eq!(
            format!("{:?}", Span::new(LineCol::new(0, 0), LineCol::new(1, 2))),
            "1:1-2:3"
        );
    }
}
